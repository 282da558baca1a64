// tests/common/mod.rs

// Logging is auto-installed for every test binary
#[ctor::ctor]
fn init_logging() {
    scorebook_test_support::logging::init();
}
