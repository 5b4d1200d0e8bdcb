use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub label: AttrValue,
}

/// Full-screen spinner shown until the splash delay has passed.
#[function_component(LoadingOverlay)]
pub fn loading_overlay(p: &Props) -> Html {
    html! {
        <div
            id="loading-overlay"
            class="absolute inset-0 bg-black bg-opacity-80 flex flex-col items-center justify-center z-50"
            role="status"
            aria-busy="true"
            aria-live="polite"
        >
            <div class="animate-spin rounded-full h-12 w-12 border-b-4 border-white mb-4" aria-hidden="true"></div>
            <p class="text-lg font-semibold text-white">{ p.label.clone() }</p>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use yew::LocalServerRenderer;

    #[test]
    fn overlay_renders_label() {
        let props = Props {
            label: AttrValue::from("A carregar..."),
        };
        let html = block_on(LocalServerRenderer::<LoadingOverlay>::with_props(props).render());
        assert!(html.contains("A carregar..."));
        assert!(html.contains("aria-busy=\"true\""));
    }
}
