// Signup, token issuance and the authenticated-user extractor.
// Handlers resolve identity here, then pass an `Actor` to the core operations.

pub mod extract;
pub mod handlers;
pub mod password;
pub mod tokens;
