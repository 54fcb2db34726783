pub mod active;
pub mod dhikr;
pub mod header;
pub mod moon;
pub mod prayers;
pub mod qibla;
pub mod statusbar;
