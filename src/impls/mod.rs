mod playback;

pub(crate) use playback::MusicApi;
