#![deny(warnings)]
pub mod bidding;
pub mod game;
pub mod model;
pub mod valuation;

pub struct AppInfo;

impl AppInfo {
    pub const fn name() -> &'static str {
        "euchre"
    }

    pub const fn codename() -> &'static str {
        "Table for Four"
    }

    pub const fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }
}

#[cfg(test)]
mod tests {
    use super::AppInfo;

    #[test]
    fn exposes_static_metadata() {
        assert_eq!(AppInfo::name(), "euchre");
        assert_eq!(AppInfo::codename(), "Table for Four");
        assert!(!AppInfo::version().is_empty());
    }
}
