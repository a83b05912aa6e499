// Reusable pieces the screens are composed from

pub mod footer;
pub mod header;
pub mod information_area;
pub mod login_header;
pub mod tab_bar;

pub use footer::Footer;
pub use header::{Affordance, Header, HeaderHandler, HeaderProps, DEFAULT_DROPDOWN_OPTIONS};
pub use information_area::InformationArea;
pub use login_header::LoginHeader;
pub use tab_bar::TabBar;
