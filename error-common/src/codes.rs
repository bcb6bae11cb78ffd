// Stable diagnostic codes
// Codes never change meaning once published; operators grep logs for them.

pub mod config {
    pub const MISSING_TENANT_APPS: &str = "TENANT_1001";
    pub const EMPTY_TENANT_APPS: &str = "TENANT_1002";
    pub const RESERVED_SCHEMA: &str = "TENANT_1003";
    pub const SCHEMA_CONFLICT: &str = "TENANT_1004";
    pub const REGISTRY_UNAVAILABLE: &str = "TENANT_1005";
}

pub mod advisory {
    pub const APP_ORDERING: &str = "TENANT_2001";
    pub const UNINITIALIZED_REGISTRY: &str = "TENANT_2002";
    pub const UNCLASSIFIED_REGISTRY_FAILURE: &str = "TENANT_2003";
}

pub mod settings {
    pub const SOURCE_FAILED: &str = "SETTINGS_3001";
    pub const INVALID_VALUE: &str = "SETTINGS_3002";
}
