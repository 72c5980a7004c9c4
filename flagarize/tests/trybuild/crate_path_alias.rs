//! Trybuild fixture naming the runtime crate explicitly.

use flagarize::{App, Flagarize, flagarize};

#[derive(Default, Flagarize)]
#[flagarize(crate = "flagarize")]
struct Explicit {
    #[flagarize("help=Port to bind.")]
    pub port: u16,
}

fn main() {
    let mut config = Explicit::default();
    let mut app = App::new("explicit");
    let registered: flagarize::FlagarizeResult<()> = flagarize(&mut app, &mut config);
    let _ = registered;
}
