//! Assemble a minimal application shell around an explicitly constructed
//! navigation controller.
//!
//! Run with: `cargo run -p rotta-core --example app_shell -- /preferiti /nope`

use rotta_core::app::views;
use rotta_core::{create_controller, NavigationController, RouterSettings, ViewRef};

/// Shell that mounts views; receives the controller instead of looking it up
struct AppShell {
    router: NavigationController,
    mounted: Option<ViewRef>,
}

impl AppShell {
    fn new(router: NavigationController) -> Self {
        Self {
            router,
            mounted: None,
        }
    }

    fn visit(&mut self, location: &str) {
        match self.router.push(location) {
            Ok(resolved) => {
                self.mounted = Some(resolved.route.view);
                println!("{location}: mounted {}", resolved.route.view);
            }
            Err(e) => println!("{location}: {e} (keeping {:?})", self.mounted.map(|v| v.name())),
        }
    }
}

fn main() -> rotta_core::Result<()> {
    rotta_core::init_tracing_with_debug(false);

    let router = create_controller(&RouterSettings::from_env())?;
    let mut shell = AppShell::new(router);

    shell.visit("/");
    for location in std::env::args().skip(1) {
        shell.visit(&location);
    }

    if shell.mounted == Some(views::HOME) {
        println!("back on the landing view");
    }
    Ok(())
}
