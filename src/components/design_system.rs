//! Shared UI primitives. Calm, minimal, light theme.

use leptos::ev;
use leptos::prelude::*;

// ============================================================================
// Button Component
// ============================================================================

#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonVariant {
    /// Solid dark button for the primary action on a page.
    #[default]
    Primary,
    /// Bordered neutral button for navigation and secondary actions.
    Secondary,
}

#[component]
pub fn Button(
    #[prop(default = ButtonVariant::Primary)] variant: ButtonVariant,
    #[prop(into)] on_click: Callback<ev::MouseEvent>,
    #[prop(default = false)] disabled: bool,
    #[prop(optional, into)] class: String,
    children: Children,
) -> impl IntoView {
    let variant_class = match variant {
        ButtonVariant::Primary => {
            "bg-zinc-900 hover:bg-zinc-700 text-white border border-transparent"
        }
        ButtonVariant::Secondary => {
            "bg-white hover:border-zinc-900 text-zinc-600 border border-zinc-200"
        }
    };

    view! {
        <button
            class=format!(
                "px-5 py-2.5 rounded text-sm font-medium transition-colors cursor-pointer \
                 disabled:opacity-50 disabled:cursor-not-allowed {} {}",
                variant_class, class,
            )
            disabled=disabled
            on:click=move |evt| {
                if !disabled {
                    on_click.run(evt);
                }
            }
        >
            {children()}
        </button>
    }
}

// ============================================================================
// Loading Spinner
// ============================================================================

#[component]
pub fn LoadingSpinner(#[prop(default = "md")] size: &'static str) -> impl IntoView {
    let size_class = match size {
        "sm" => "w-4 h-4",
        "lg" => "w-8 h-8",
        _ => "w-6 h-6",
    };

    view! {
        <div class=format!(
            "animate-spin rounded-full border-2 border-zinc-300 border-t-zinc-900 {}",
            size_class,
        ) />
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn button_variant_defaults_to_primary() {
        // Pattern matching since ButtonVariant doesn't implement Debug.
        assert!(matches!(ButtonVariant::default(), ButtonVariant::Primary));
        assert!(ButtonVariant::Primary != ButtonVariant::Secondary);
    }
}
