/// Navigation destinations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    /// Username/password sign in, plus the SteemConnect tab
    Login,
    /// Delegated (SteemConnect) login
    SteemConnect,
    /// Post-login destination
    PinCode,
}

impl Screen {
    /// Stable destination name, as used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Screen::Login => "navigation.eSteem.Login",
            Screen::SteemConnect => "navigation.eSteem.SteemConnect",
            Screen::PinCode => "navigation.eSteem.PinCode",
        }
    }
}
