mod help;
mod import;
mod menu_bar;
mod palette_bar;
mod status_bar;
mod toolbar;
