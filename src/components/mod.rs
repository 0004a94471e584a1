pub mod app;
pub mod end_screen;
pub mod guess_button;
pub mod guess_map;
pub mod leaderboard;
pub mod photo_view;
pub mod scoreboard;
pub mod timer_bar;
