// HTTP-level tests for the VoiceID backend.
//
// Each test boots the real router on an ephemeral port, backed by the
// in-memory stores and fake external collaborators (identity provider,
// audio storage, phrase generator), and drives it with a hyper client.
// No Docker or network access is needed.

mod helpers;
mod test_admin;
mod test_auth;
