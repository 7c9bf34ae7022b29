//! CI-facing configuration shared by the property suites.

pub mod property_test_profile;
