pub mod add;
pub mod calendars;
pub mod cleanup;
pub mod events;
pub mod new;
pub mod sync;
