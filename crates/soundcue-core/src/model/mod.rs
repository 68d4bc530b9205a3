pub mod record;
pub mod view;

pub use record::{RawAudioRecord, RecordId, UploadAck};
pub use view::{MusicViewModel, UNKNOWN_ARTIST};
