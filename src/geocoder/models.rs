use serde::Deserialize;

// Place Details response, only the parts we read:
//  ├── status
//  └── result
//       └── formatted_address   "No. 1, Section 2, Xinyi Rd, Da'an District, Taipei City, Taiwan 106"

#[derive(Debug, Deserialize)]
pub struct PlaceDetailsResponse {
    pub status: Option<String>,
    pub result: Option<PlaceResult>,
}

#[derive(Debug, Deserialize)]
pub struct PlaceResult {
    pub formatted_address: Option<String>,
}
