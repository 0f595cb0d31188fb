use serde::{Deserialize, Serialize};

/// Join entity between a user and a professor. At most one exists per
/// (owner, professor) pair; the repository layer enforces nothing, the
/// API layer does.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Like {
    pub id: String,
    pub owner_id: String,
    pub professor_id: String,
}

/// Body of `POST /api/v1/manage-like`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeCreateRequest {
    pub professor_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeCreateResponse {
    /// Opaque like id the client stores for a later delete.
    pub id: String,
}

/// Body of `DELETE /api/v1/manage-like`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LikeDeleteRequest {
    /// The like id, under the legacy key.
    pub like: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LikeDeleteResponse {
    pub message: String,
}

/// Current like state for one (viewer, professor) pair, used to render
/// the like box.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeStatus {
    pub exists: bool,
    pub like_id: Option<String>,
    pub like_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_uses_camel_case_key() {
        let req: LikeCreateRequest =
            serde_json::from_str(r#"{"professorId": "prof-7"}"#).unwrap();
        assert_eq!(req.professor_id, "prof-7");
    }

    #[test]
    fn delete_request_uses_legacy_like_key() {
        let req: LikeDeleteRequest = serde_json::from_str(r#"{"like": "l-3"}"#).unwrap();
        assert_eq!(req.like, "l-3");
    }

    #[test]
    fn status_wire_shape() {
        let status = LikeStatus {
            exists: true,
            like_id: Some("l-3".into()),
            like_count: 12,
        };
        let json = serde_json::to_value(&status).unwrap();
        assert_eq!(json["likeId"], "l-3");
        assert_eq!(json["likeCount"], 12);
    }
}
