use serde::Deserialize;

// Only the path data.grand_total.human_readable_total of the WakaTime share payload

#[derive(Deserialize, Debug)]
pub struct ShareResponse {
    pub data: Data,
}

#[derive(Deserialize, Debug)]
pub struct Data {
    pub grand_total: GrandTotal,
}

#[derive(Deserialize, Debug)]
pub struct GrandTotal {
    pub human_readable_total: String,
}
