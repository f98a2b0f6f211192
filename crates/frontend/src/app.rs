//! Демо-страница: три вкладки с fade, закладками и выравниванием высоты,
//! плюс кнопки для команд activate / disable / enable.

use crate::shared::components::button::Button;
use crate::shared::components::tabs::{TabContainer, TabsRef};
use leptos::prelude::*;
use tabkit_core::fx::Speed;
use tabkit_core::{Position, TabEvent, TabsConfig};

const DEMO_CSS: &str = r#"
.tabs-hide { display: none; }
.demo-tabs > ul { display: flex; gap: 4px; list-style: none; margin: 0; padding: 0; }
.demo-tabs > ul > li > a { display: block; padding: 6px 14px; border: 1px solid #ccc; border-bottom: none; text-decoration: none; color: inherit; }
.demo-tabs > ul > li.tabs-selected > a { background: #f3f3f3; font-weight: 600; }
.demo-tabs > ul > li.tabs-disabled > a { opacity: 0.4; cursor: default; }
.demo-tabs > div { border: 1px solid #ccc; padding: 12px; }
.demo-controls { display: flex; gap: 8px; margin-top: 12px; }
"#;

fn demo_config() -> TabsConfig {
    TabsConfig {
        bookmarkable: true,
        fx_fade: true,
        fx_speed: Speed::Fast,
        fx_auto_height: true,
        disabled: vec![Position::from(3)],
        ..TabsConfig::default()
    }
}

#[component]
pub fn App() -> impl IntoView {
    let tabs = TabsRef::new();
    let (status, set_status) = signal(String::from("Вкладка 1"));
    let (third_disabled, set_third_disabled) = signal(true);

    let on_show = Callback::new(move |e: TabEvent| {
        set_status.set(format!("Вкладка {}", e.to_show + 1));
    });

    view! {
        <style>{DEMO_CSS}</style>
        <div style="padding: 20px; max-width: 720px; margin: 0 auto;">
            <h1 style="margin-bottom: 16px; font-size: 22px;">"tabkit"</h1>

            <TabContainer class="demo-tabs" config=demo_config() tabs_ref=tabs on_show=on_show>
                <ul>
                    <li><a href="#demo-overview">"Overview"</a></li>
                    <li><a href="#demo-details">"Details"</a></li>
                    <li><a href="#demo-extra">"Extra"</a></li>
                </ul>
                <div id="demo-overview">
                    <p>"Click a tab or use the buttons below."</p>
                </div>
                <div id="demo-details">
                    <p>"The location fragment follows the active tab, so back and forward work."</p>
                    <p>"All panels share the height of the tallest one."</p>
                </div>
                <div id="demo-extra">
                    <p>"This tab starts disabled."</p>
                </div>
            </TabContainer>

            <div class="demo-controls">
                <Button on_click=Callback::new(move |_| {
                    tabs.activate(1);
                })>
                    "Activate 1"
                </Button>
                <Button on_click=Callback::new(move |_| {
                    tabs.activate(2);
                })>
                    "Activate 2"
                </Button>
                <Button
                    disabled=Signal::derive(move || third_disabled.get())
                    on_click=Callback::new(move |_| {
                        tabs.activate(3);
                    })
                >
                    "Activate 3"
                </Button>
                <Button
                    variant="ghost"
                    on_click=Callback::new(move |_| {
                        if third_disabled.get_untracked() {
                            tabs.enable(3);
                        } else {
                            tabs.disable(3);
                        }
                        set_third_disabled.update(|d| *d = !*d);
                    })
                >
                    {move || if third_disabled.get() { "Enable 3" } else { "Disable 3" }}
                </Button>
            </div>

            <p style="margin-top: 12px;">{move || status.get()}</p>
        </div>
    }
}
