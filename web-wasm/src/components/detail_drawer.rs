//! 物件詳細ドロワーコンポーネント

use leptos::ev;
use leptos::prelude::*;
use property_map_common::DetailView;

#[component]
pub fn DetailDrawer<F>(
    open: Memo<bool>,
    detail: Memo<Option<DetailView>>,
    on_close: F,
) -> impl IntoView
where
    F: Fn(()) + 'static + Clone + Send,
{
    // Escキーでも閉じる
    let handle = window_event_listener(ev::keydown, {
        let on_close = on_close.clone();
        move |ev| {
            if ev.key() == "Escape" && open.get_untracked() {
                on_close(());
            }
        }
    });
    on_cleanup(move || handle.remove());

    view! {
        <aside
            class="drawer"
            class:open=move || open.get()
            aria-hidden=move || (!open.get()).to_string()
        >
            <div class="drawer-header">
                <button
                    class="icon-button"
                    title="Close"
                    on:click=move |_| on_close(())
                >
                    "✕"
                </button>
            </div>
            <hr class="divider" />
            {move || detail.get().map(|d| {
                view! {
                    <div class="drawer-body">
                        {d.fields
                            .into_iter()
                            .map(|field| view! {
                                <div class="detail-row">
                                    <span class="detail-label">{format!("{}:", field.label)}</span>
                                    <span class="detail-value">{field.value}</span>
                                </div>
                            })
                            .collect_view()}
                    </div>
                }
            })}
        </aside>
    }
}
