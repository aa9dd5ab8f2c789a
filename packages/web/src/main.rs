use dioxus::prelude::*;

use ui::CamperRoster;

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        div {
            class: "app",
            div {
                class: "app__container",
                h1 { class: "app__title", "🦕 Dino Camp Roster" }
                CamperRoster {}
            }
        }
    }
}
