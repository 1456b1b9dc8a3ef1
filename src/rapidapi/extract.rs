use crate::models::GenerationResult;
use serde_json::Value;

pub const PLACEHOLDER_IMAGE_URL: &str = "https://via.placeholder.com/600x400?text=Generated+Image";

/// Candidate locations of the image URL, highest priority first.
const IMAGE_URL_POINTERS: [&str; 4] = ["/generated_image", "/image_url", "/url", "/data/0/url"];

/// First candidate holding a non-empty string, with the pointer it came from.
pub fn find_image_url(document: &Value) -> Option<(&'static str, &str)> {
    IMAGE_URL_POINTERS.iter().find_map(|pointer| {
        document
            .pointer(pointer)
            .and_then(Value::as_str)
            .filter(|url| !url.is_empty())
            .map(|url| (*pointer, url))
    })
}

/// Reads the image URL out of a successful upstream response.
///
/// A body with none of the recognized fields still succeeds and yields
/// [`PLACEHOLDER_IMAGE_URL`].
pub fn resolve_image_url(document: &Value) -> GenerationResult {
    match find_image_url(document) {
        Some((_, url)) => GenerationResult {
            image_url: url.to_string(),
            is_placeholder: false,
        },
        None => GenerationResult {
            image_url: PLACEHOLDER_IMAGE_URL.to_string(),
            is_placeholder: true,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_each_field_alone() {
        let cases = [
            (json!({ "generated_image": "a" }), "/generated_image"),
            (json!({ "image_url": "b" }), "/image_url"),
            (json!({ "url": "c" }), "/url"),
            (json!({ "data": [{ "url": "d" }] }), "/data/0/url"),
        ];

        for (document, expected) in cases {
            let (pointer, _) = find_image_url(&document).unwrap();
            assert_eq!(pointer, expected);
        }
    }

    #[test]
    fn test_priority_order() {
        let document = json!({
            "data": [{ "url": "from-data" }],
            "url": "from-url",
            "image_url": "from-image-url",
            "generated_image": "from-generated",
        });
        assert_eq!(resolve_image_url(&document).image_url, "from-generated");

        let document = json!({
            "data": [{ "url": "from-data" }],
            "url": "from-url",
            "image_url": "from-image-url",
        });
        assert_eq!(resolve_image_url(&document).image_url, "from-image-url");

        let document = json!({ "data": [{ "url": "from-data" }], "url": "from-url" });
        assert_eq!(resolve_image_url(&document).image_url, "from-url");
    }

    #[test]
    fn test_empty_and_non_string_values_are_skipped() {
        let document = json!({
            "generated_image": "",
            "image_url": 17,
            "url": null,
            "data": [{ "url": "from-data" }],
        });
        assert_eq!(resolve_image_url(&document).image_url, "from-data");
    }

    #[test]
    fn test_only_first_data_entry_is_considered() {
        let document = json!({ "data": [{ "b64_json": "..." }, { "url": "second" }] });
        let result = resolve_image_url(&document);
        assert!(result.is_placeholder);
        assert_eq!(result.image_url, PLACEHOLDER_IMAGE_URL);
    }

    #[test]
    fn test_placeholder_for_unrecognized_documents() {
        for document in [json!({ "status": "ok" }), json!([]), json!(null), json!("text")] {
            let result = resolve_image_url(&document);
            assert!(result.is_placeholder);
            assert_eq!(result.image_url, PLACEHOLDER_IMAGE_URL);
        }
    }
}
