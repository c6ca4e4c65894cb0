use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ImageResponse {
    pub status: bool,
    pub message: &'static str,
    #[serde(rename = "imagePath")]
    pub image_path: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub status: bool,
    pub message: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_response_uses_camel_case_path() {
        let json = serde_json::to_string(&ImageResponse {
            status: true,
            message: "Image uploaded successfully",
            image_path: "teachers/a/b.jpg".into(),
        })
        .unwrap();
        assert!(json.contains(r#""imagePath":"teachers/a/b.jpg""#));
        assert!(json.contains(r#""status":true"#));
    }
}
