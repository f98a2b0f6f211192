pub mod button;
pub mod tabs;
