// End-to-end tests for the voxbridge HTTP API
//
// Each test boots the real router on an ephemeral port with:
// - a temporary voice asset root populated with fake voice packs
// - a scripted translation engine in place of the hosted model
// - a tone generator in place of the sherpa-onnx engine
//
// Nothing is shared between tests, so they run in parallel.

mod helpers;
mod test_health;
