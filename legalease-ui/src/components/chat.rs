//! Chat Panel
//!
//! Follow-up questions about the analyzed document. Several questions can be
//! outstanding; each answer is slotted after its own question.

use leptos::*;

use crate::api;
use crate::state::chat::{Answer, ChatTranscript, Turn};

const NO_ANSWER_NOTICE: &str = "Sorry, no answer could be retrieved. Please try again.";

#[component]
pub fn ChatPanel(
    /// Document text sent with every question
    #[prop(into)]
    context: String,
) -> impl IntoView {
    let transcript = create_rw_signal(ChatTranscript::default());
    let (input, set_input) = create_signal(String::new());
    let context = store_value(context);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let mut submitted = None;
        transcript.update(|t| submitted = t.begin(&input.get_untracked()));
        let Some((seq, question)) = submitted else {
            return;
        };
        set_input.set(String::new());

        let context = context.get_value();
        spawn_local(async move {
            let answer = match api::ask_question(&question, &context).await {
                Ok(text) => Answer::Received(text),
                Err(e) => {
                    web_sys::console::warn_1(&format!("Chat request failed: {}", e).into());
                    Answer::Failed(e)
                }
            };
            transcript.update(|t| t.complete(seq, answer));
        });
    };

    view! {
        <section id="chat" class="content-section chat">
            <h2>"Ask a Question"</h2>
            <div id="chatMessages" class="chat-messages">
                {move || transcript.with(|t| t.turns()).into_iter().map(|turn| match turn {
                    Turn::User(text) => view! {
                        <div class="chat-message chat-user">
                            <div class="message-content"><p>{text}</p></div>
                        </div>
                    }.into_view(),
                    Turn::Assistant(text) => view! {
                        <div class="chat-message chat-ai">
                            <div class="message-content"><p>{text}</p></div>
                        </div>
                    }.into_view(),
                    Turn::NoAnswer => view! {
                        <div class="chat-message chat-ai chat-failed">
                            <div class="message-content"><p>{NO_ANSWER_NOTICE}</p></div>
                        </div>
                    }.into_view(),
                }).collect_view()}

                <Show when=move || transcript.with(|t| t.pending())>
                    <div class="chat-message chat-ai chat-typing"><p>"..."</p></div>
                </Show>
            </div>

            <form class="chat-input" on:submit=on_submit>
                <input
                    id="chatInput"
                    type="text"
                    placeholder="Ask anything about this document..."
                    prop:value=move || input.get()
                    on:input=move |ev| set_input.set(event_target_value(&ev))
                />
                <button type="submit" class="btn-primary">"Send"</button>
            </form>
        </section>
    }
}
