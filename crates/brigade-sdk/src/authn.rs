//! Authn API resources: users and service accounts.

use serde::{Deserialize, Serialize};

use crate::meta::ObjectMeta;

/// A human user known to the API server.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub locked: bool,
}

/// A non-human identity used for machine-to-machine auth.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceAccount {
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub locked: bool,
}

/// Filter criteria for listing users. The API accepts only an unfiltered
/// listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UsersSelector {}

/// Filter criteria for listing service accounts. The API accepts only an
/// unfiltered listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServiceAccountsSelector {}
