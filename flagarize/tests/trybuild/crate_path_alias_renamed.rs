//! Trybuild fixture reaching the runtime crate through a `use ... as` alias.

use flagarize as flags;
use flags::{App, Flagarize};

#[derive(Default, Flagarize)]
#[flagarize(crate = "flags")]
struct Aliased {
    #[flagarize("help=Port to bind.")]
    pub port: u16,
    #[flagarize(flatten)]
    pub nested: Nested,
}

#[derive(Default, Flagarize)]
#[flagarize(crate = "flags")]
struct Nested {
    #[flagarize("help=Enable tracing.")]
    pub trace: bool,
}

fn main() {
    let mut config = Aliased::default();
    let mut app = App::new("aliased");
    let registered: flags::FlagarizeResult<()> = flags::flagarize(&mut app, &mut config);
    let _ = registered;
}
