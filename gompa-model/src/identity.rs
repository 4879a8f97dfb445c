use uuid::Uuid;

/// The caller behind a valid session, as reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionUser {
    pub id: Uuid,
    pub email: Option<String>,
}
