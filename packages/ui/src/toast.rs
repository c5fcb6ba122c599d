use std::time::Duration;

use dioxus::prelude::*;

/// How long a toast stays on screen before it dismisses itself.
pub const TOAST_DURATION: Duration = Duration::from_secs(4);

/// Oldest toasts are dropped beyond this many.
const MAX_VISIBLE: usize = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Error,
}

impl ToastLevel {
    fn class(self) -> &'static str {
        match self {
            ToastLevel::Info => "toast toast-info",
            ToastLevel::Success => "toast toast-success",
            ToastLevel::Error => "toast toast-error",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub level: ToastLevel,
    pub message: String,
}

#[derive(Clone, Debug, Default)]
pub struct Toasts {
    entries: Vec<Toast>,
    next_id: u64,
}

impl Toasts {
    /// Queue a toast and return its id.
    pub fn push(&mut self, level: ToastLevel, message: impl Into<String>) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.entries.push(Toast {
            id,
            level,
            message: message.into(),
        });
        if self.entries.len() > MAX_VISIBLE {
            let overflow = self.entries.len() - MAX_VISIBLE;
            self.entries.drain(..overflow);
        }
        id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.entries.retain(|toast| toast.id != id);
    }

    pub fn entries(&self) -> &[Toast] {
        &self.entries
    }
}

/// Handle for raising notifications from any component under [`ToastProvider`].
#[derive(Clone, Copy)]
pub struct Toaster {
    toasts: Signal<Toasts>,
    duration: Duration,
}

impl Toaster {
    /// Raise a toast. The dismiss timer runs at the root scope, so it
    /// outlives the component that raised it.
    pub fn show(&self, level: ToastLevel, message: impl Into<String>) {
        let mut toasts = self.toasts;
        let duration = self.duration;
        let id = toasts.write().push(level, message);
        spawn_forever(async move {
            sleep(duration).await;
            toasts.write().dismiss(id);
        });
    }

    pub fn info(&self, message: impl Into<String>) {
        self.show(ToastLevel::Info, message);
    }

    pub fn success(&self, message: impl Into<String>) {
        self.show(ToastLevel::Success, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.show(ToastLevel::Error, message);
    }

    pub fn dismiss(&self, id: u64) {
        let mut toasts = self.toasts;
        toasts.write().dismiss(id);
    }

    /// Number of toasts on screen. Subscribes the caller.
    pub fn visible(&self) -> usize {
        self.toasts.read().entries().len()
    }
}

pub fn use_toaster() -> Toaster {
    use_context::<Toaster>()
}

/// Provides the [`Toaster`] context and renders the toast stack.
#[component]
pub fn ToastProvider(
    #[props(default = TOAST_DURATION)] duration: Duration,
    children: Element,
) -> Element {
    let toasts = use_signal(Toasts::default);
    let toaster = use_context_provider(|| Toaster { toasts, duration });

    rsx! {
        {children}
        div {
            class: "toast-viewport",
            for toast in toasts.read().entries().iter().cloned() {
                ToastItem {
                    key: "{toast.id}",
                    toast,
                    on_dismiss: move |id| toaster.dismiss(id),
                }
            }
        }
    }
}

#[component]
fn ToastItem(toast: Toast, on_dismiss: EventHandler<u64>) -> Element {
    let id = toast.id;
    rsx! {
        div {
            class: toast.level.class(),
            role: "status",
            onclick: move |_| on_dismiss.call(id),
            "{toast.message}"
        }
    }
}

#[cfg(target_arch = "wasm32")]
async fn sleep(duration: Duration) {
    gloo_timers::future::sleep(duration).await;
}

#[cfg(not(target_arch = "wasm32"))]
async fn sleep(duration: Duration) {
    tokio::time::sleep(duration).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_push_assigns_increasing_ids() {
        let mut toasts = Toasts::default();
        let a = toasts.push(ToastLevel::Info, "one");
        let b = toasts.push(ToastLevel::Error, "two");
        assert!(b > a);
        assert_eq!(toasts.entries().len(), 2);
        assert_eq!(toasts.entries()[1].level, ToastLevel::Error);
    }

    #[test]
    fn test_dismiss_removes_only_that_toast() {
        let mut toasts = Toasts::default();
        let a = toasts.push(ToastLevel::Info, "one");
        toasts.push(ToastLevel::Success, "two");
        toasts.dismiss(a);
        assert_eq!(toasts.entries().len(), 1);
        assert_eq!(toasts.entries()[0].message, "two");

        // Dismissing twice is harmless
        toasts.dismiss(a);
        assert_eq!(toasts.entries().len(), 1);
    }

    #[test]
    fn test_oldest_dropped_past_limit() {
        let mut toasts = Toasts::default();
        for i in 0..MAX_VISIBLE + 2 {
            toasts.push(ToastLevel::Info, format!("toast {i}"));
        }
        assert_eq!(toasts.entries().len(), MAX_VISIBLE);
        assert_eq!(toasts.entries()[0].message, "toast 2");
    }

    thread_local! {
        static VISIBLE: Cell<usize> = const { Cell::new(0) };
        static PEAK: Cell<usize> = const { Cell::new(0) };
    }

    #[component]
    fn Shell() -> Element {
        rsx! {
            ToastProvider {
                duration: Duration::from_millis(30),
                SignOutFlow {}
            }
        }
    }

    /// Raises a toast from a child that is unmounted straight afterwards,
    /// like a logout button navigating away.
    #[component]
    fn SignOutFlow() -> Element {
        let mut mounted = use_signal(|| true);
        rsx! {
            if mounted() {
                Notifier { on_raised: move |_| mounted.set(false) }
            }
            VisibleCount {}
        }
    }

    #[component]
    fn Notifier(on_raised: EventHandler<()>) -> Element {
        let toaster = use_toaster();
        use_effect(move || {
            toaster.info("Signed out");
            on_raised.call(());
        });
        rsx! {}
    }

    #[component]
    fn VisibleCount() -> Element {
        let count = use_toaster().visible();
        VISIBLE.with(|v| v.set(count));
        PEAK.with(|p| p.set(p.get().max(count)));
        rsx! {}
    }

    #[tokio::test]
    async fn test_toast_dismissed_after_raiser_unmounts() {
        let mut dom = VirtualDom::new(Shell);
        dom.rebuild_in_place();

        let deadline = tokio::time::Instant::now() + Duration::from_millis(500);
        while tokio::time::Instant::now() < deadline {
            let _ = tokio::time::timeout(Duration::from_millis(10), dom.wait_for_work()).await;
            dom.render_immediate_to_vec();
        }

        assert_eq!(PEAK.with(Cell::get), 1);
        assert_eq!(VISIBLE.with(Cell::get), 0);
    }
}
