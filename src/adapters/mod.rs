//! Port implementations: live services, cassette recording and replay.

pub mod live;
pub mod recording;
pub mod replaying;
