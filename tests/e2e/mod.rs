// End-to-end tests for the Kataru Backend API
//
// Each test gets a fresh TestContext: the real axum router bound to an
// ephemeral port, wired to in-memory fakes for the four external
// collaborators (story generator, speech synthesis, audio storage and the
// document store). Tests drive the server over HTTP and then inspect the
// fakes to assert on side effects.
//
// No containers or cloud credentials are needed, so tests run in parallel.

mod test_generate_story;
