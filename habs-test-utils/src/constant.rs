/// Plain-text password of every fixture account
pub static TEST_PASSWORD: &str = "password123";
/// Secret used to sign bearer tokens in tests
pub static TEST_JWT_SECRET: &str = "test_jwt_secret";
pub static TEST_MAP_CLIENT_ID: &str = "map_client_id";
pub static TEST_MAP_CLIENT_SECRET: &str = "map_client_secret";
/// Access token returned by the mock map provider
pub static TEST_MAP_TOKEN: &str = "map_access_token";
