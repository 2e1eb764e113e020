pub mod flash;
pub mod session;

pub use flash::{Flash, FlashLevel};
pub use session::{RequireClient, attendee_ticket, remember_attendee, sign_in, sign_out};
