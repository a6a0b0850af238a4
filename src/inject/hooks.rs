use super::controller::InjectionController;
use crate::page::surface::PageSurface;
use crate::settings::store::SettingsStore;

/// Trigger surface the host wires to page lifecycle events
///
/// The pipeline runs once at script load and once per client-side
/// navigation completion. Controller errors are logged and swallowed;
/// nothing is fatal to the host page.
pub struct NavigationHook<P, S> {
    controller: InjectionController<P, S>,
}

impl<P: PageSurface, S: SettingsStore> NavigationHook<P, S> {
    pub fn new(controller: InjectionController<P, S>) -> Self {
        Self { controller }
    }

    /// Initial invocation at script load
    pub async fn on_load(&mut self) {
        self.run().await;
    }

    /// Re-invocation after a client-side navigation completes
    ///
    /// A resolution still in flight from an earlier trigger is not
    /// cancelled.
    pub async fn on_navigation(&mut self) {
        log::trace!("Client-side navigation completed");
        self.run().await;
    }

    /// The controller, for wiring prompt dialog events (open, close,
    /// submit) to their handlers
    pub fn controller(&mut self) -> &mut InjectionController<P, S> {
        &mut self.controller
    }

    async fn run(&mut self) {
        if let Err(e) = self.controller.inject().await {
            log::error!("Repository size injection failed: {e}");
        }
    }
}
