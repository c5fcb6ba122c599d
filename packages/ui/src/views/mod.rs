mod modal_overlay;
pub use modal_overlay::ModalOverlay;

mod loading;
pub use loading::LoadingScreen;
