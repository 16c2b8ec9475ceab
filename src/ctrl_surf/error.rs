#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Note {:#04x} is already assigned", .0)]
    DuplicateNote(u8),

    #[error("Control Change {:#04x} is already assigned", .0)]
    DuplicateCc(u8),
}
