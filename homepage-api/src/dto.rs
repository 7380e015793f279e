use homepage_categories::{CategoryId, CategorySnapshot};
use serde::{Deserialize, Serialize};

use crate::errors::{ApiError, Result};

/// Response envelope wrapping every blog API payload.
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    pub response: Option<T>,
    #[serde(default)]
    pub error: Option<ApiErrorBody>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiErrorBody {
    pub message: String,
    pub status: u16,
}

impl<T> ApiEnvelope<T> {
    /// Unwrap the payload or turn the error body into an [`ApiError`].
    pub fn into_result(self) -> Result<T> {
        if !self.success {
            let (status, message) = match self.error {
                Some(error) => (error.status, error.message),
                None => (0, String::from("unknown error")),
            };
            return Err(ApiError::Rejected { status, message });
        }
        self.response.ok_or(ApiError::EmptyResponse)
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub id: &'a str,
    pub pw: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginResult {
    pub id: String,
}

/// Body of a category create or update.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CategoryRequest<'a> {
    pub name: &'a str,
    pub parent_id: Option<i64>,
}

/// Category echoed back after a write. The server omits the id.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CategoryRecord {
    pub name: String,
    #[serde(default)]
    pub parent: Option<String>,
}

/// Category forest node with aggregated post counts.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryWithPostsCount {
    pub category_id: i64,
    pub name: String,
    #[serde(default)]
    pub parent_id: Option<i64>,
    #[serde(default)]
    pub posts_count: u64,
    #[serde(default)]
    pub child_list: Vec<CategoryWithPostsCount>,
}

impl From<CategoryWithPostsCount> for CategorySnapshot {
    fn from(value: CategoryWithPostsCount) -> Self {
        Self {
            id: CategoryId::new(value.category_id),
            name: value.name,
            parent_id: value.parent_id.map(CategoryId::new),
            post_count: value.posts_count,
            children: value.child_list.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn given_success_body_when_unwrapped_then_payload_is_returned() {
        let body = json!({
            "success": true,
            "response": { "id": "admin" },
            "error": null
        });

        let envelope: ApiEnvelope<LoginResult> =
            serde_json::from_value(body).expect("envelope should parse");

        assert_eq!(
            envelope.into_result().expect("payload should be present"),
            LoginResult {
                id: String::from("admin"),
            }
        );
    }

    #[test]
    fn given_error_body_when_unwrapped_then_rejection_carries_status() {
        let body = json!({
            "success": false,
            "response": null,
            "error": {
                "message": "duplicate category",
                "status": 400
            }
        });

        let envelope: ApiEnvelope<CategoryRecord> =
            serde_json::from_value(body).expect("envelope should parse");

        match envelope.into_result() {
            Err(ApiError::Rejected { status, message }) => {
                assert_eq!(status, 400);
                assert_eq!(message, "duplicate category");
            },
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn given_success_without_payload_when_unwrapped_then_empty_response() {
        let body = json!({ "success": true });

        let envelope: ApiEnvelope<bool> =
            serde_json::from_value(body).expect("envelope should parse");

        assert!(matches!(
            envelope.into_result(),
            Err(ApiError::EmptyResponse)
        ));
    }

    #[test]
    fn given_category_forest_when_converted_then_snapshots_keep_structure() {
        let body = json!([
            {
                "categoryId": 1,
                "name": "Dev",
                "parentId": null,
                "postsCount": 3,
                "childList": [
                    {
                        "categoryId": 4,
                        "name": "Rust",
                        "parentId": 1,
                        "postsCount": 3,
                        "childList": []
                    }
                ]
            },
            {
                "categoryId": 2,
                "name": "Life",
                "parentId": null,
                "postsCount": 0,
                "childList": []
            }
        ]);

        let forest: Vec<CategoryWithPostsCount> =
            serde_json::from_value(body).expect("forest should parse");
        let snapshots: Vec<CategorySnapshot> =
            forest.into_iter().map(Into::into).collect();

        assert_eq!(snapshots.len(), 2);
        assert_eq!(snapshots[0].post_count, 3);
        assert_eq!(snapshots[0].children[0].id, CategoryId::new(4));
        assert_eq!(
            snapshots[0].children[0].parent_id,
            Some(CategoryId::new(1))
        );
        assert!(snapshots[1].children.is_empty());
    }

    #[test]
    fn given_category_request_when_serialized_then_fields_are_camel_case() {
        let request = CategoryRequest {
            name: "Rust",
            parent_id: Some(1),
        };

        let value = serde_json::to_value(&request).expect("should serialize");

        assert_eq!(value, json!({ "name": "Rust", "parentId": 1 }));
    }
}
