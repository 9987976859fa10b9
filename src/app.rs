use gloo_timers::future::TimeoutFuture;
use leptos::ev::SubmitEvent;
use leptos::logging::log;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_meta::{provide_meta_context, MetaTags, Stylesheet, Title};
use leptos_router::{
    components::{Route, Router, Routes},
    hooks::use_query_map,
    path,
};

use crate::api;
use crate::feedback::{self, CharTile, Palette, PreviewCell, PreviewLookup, TextColoring, Tile};
use crate::model::GuessResponse;
use crate::session::{
    is_cjk, validate_guess, GameOptions, InputMode, Session, DEFAULT_MAX_ATTEMPTS, WORD_LEN,
};

/// Toasts dismiss themselves after this many milliseconds.
const TOAST_MS: u32 = 3_000;

pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="zh-CN">
            <head>
                <meta charset="utf-8" />
                <meta name="viewport" content="width=device-width, initial-scale=1" />
                <AutoReload options=options.clone() />
                <HydrationScripts options />
                <MetaTags />
            </head>
            <body>
                <App />
            </body>
        </html>
    }
}

#[component]
pub fn App() -> impl IntoView {
    // Provides context that manages stylesheets, titles, meta tags, etc.
    provide_meta_context();

    view! {
        // injects a stylesheet into the document <head>
        // id=leptos means cargo-leptos will hot-reload this stylesheet
        <Stylesheet id="leptos" href="/pkg/chengyu-wordle.css" />

        // sets the document title
        <Title text="中文四字词语猜词游戏" />

        <Router>
            <main>
                <Routes fallback=|| "页面不存在。".into_view()>
                    <Route path=path!("/") view=Game />
                </Routes>
            </main>
        </Router>
    }
}

/// Which panel is visible. Transitions are driven by server responses and
/// the two user actions (start game, back to rules).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Phase {
    Rules,
    Playing,
    Result,
}

#[component]
fn Game() -> impl IntoView {
    let query = use_query_map();
    let options = query.with_untracked(|q| {
        GameOptions::from_query(q.get("theme").as_deref(), q.get("input").as_deref())
    });
    let palette = options.palette;

    let phase = RwSignal::new(Phase::Rules);
    let session = RwSignal::new(Session::default());
    let input = RwSignal::new(String::new());
    let lookup = RwSignal::new(PreviewLookup::Idle);
    // Sequence number for preview lookups; responses that no longer match
    // the latest issued number are discarded instead of rendered stale.
    let preview_seq = RwSignal::new(0u64);
    let in_flight = RwSignal::new(0u32);
    let toast = RwSignal::new(None::<String>);
    let final_result = RwSignal::new(None::<GuessResponse>);
    let input_ref = NodeRef::<leptos::html::Input>::new();

    let show_toast = move |msg: String| {
        toast.set(Some(msg));
        spawn_local(async move {
            TimeoutFuture::new(TOAST_MS).await;
            toast.set(None);
        });
    };

    let focus_input = move || {
        if let Some(el) = input_ref.get_untracked() {
            let _ = el.focus();
        }
    };

    // Requests a fresh session. On any failure the prior session state is
    // left untouched; only a toast is shown.
    let start_game = move |_| {
        spawn_local(async move {
            in_flight.update(|n| *n += 1);
            let resp = api::new_game().await;
            in_flight.update(|n| *n = n.saturating_sub(1));
            match resp {
                Ok(r) if r.success => {
                    let game_id = r.game_id.unwrap_or_default();
                    let max = r.max_attempts.unwrap_or(DEFAULT_MAX_ATTEMPTS);
                    session.set(Session::begin(game_id, max));
                    final_result.set(None);
                    input.set(String::new());
                    lookup.set(PreviewLookup::Idle);
                    phase.set(Phase::Playing);
                    focus_input();
                }
                Ok(r) => show_toast(r.message.unwrap_or_else(|| "开始游戏失败".into())),
                Err(e) => {
                    log!("new_game failed: {}", e.detail());
                    show_toast(e.to_string());
                }
            }
        });
    };

    // Validates locally before spending a round trip; the server remains
    // authoritative and its rejection message is shown verbatim.
    let submit_guess = move |ev: SubmitEvent| {
        ev.prevent_default();
        if !session.with_untracked(|s| s.accepts_guesses()) {
            return;
        }
        let word = input.get_untracked().trim().to_string();
        if let Err(e) = validate_guess(&word) {
            show_toast(e.to_string());
            return;
        }
        spawn_local(async move {
            in_flight.update(|n| *n += 1);
            let resp = api::guess(&word).await;
            in_flight.update(|n| *n = n.saturating_sub(1));
            match resp {
                Ok(r) if r.success => {
                    session.update(|s| s.record_guess(&word, &r));
                    if r.game_over {
                        final_result.set(Some(r));
                        phase.set(Phase::Result);
                    } else {
                        input.set(String::new());
                        lookup.set(PreviewLookup::Idle);
                        focus_input();
                    }
                }
                Ok(r) => show_toast(r.message.unwrap_or_else(|| "提交失败".into())),
                Err(e) => {
                    log!("guess failed: {}", e.detail());
                    show_toast(e.to_string());
                }
            }
        });
    };

    // Mirrors keystrokes into the preview immediately; once four CJK chars
    // are present, fetches pinyin/tone for display only (never scored).
    let handle_input = move |mut value: String| {
        if options.input == InputMode::Trim && value.chars().count() > WORD_LEN {
            value = value.chars().take(WORD_LEN).collect();
        }
        input.set(value.clone());
        if value.chars().count() == WORD_LEN && value.chars().all(is_cjk) {
            let seq = preview_seq.get_untracked() + 1;
            preview_seq.set(seq);
            lookup.set(PreviewLookup::Fetching);
            spawn_local(async move {
                in_flight.update(|n| *n += 1);
                let resp = api::get_pinyin(&value).await;
                in_flight.update(|n| *n = n.saturating_sub(1));
                if preview_seq.get_untracked() != seq {
                    // Superseded by newer input; drop the stale response.
                    return;
                }
                match resp {
                    Ok(r) if r.success => lookup.set(PreviewLookup::Ready(r.characters)),
                    Ok(_) => lookup.set(PreviewLookup::Failed),
                    Err(e) => {
                        log!("pinyin preview failed: {}", e.detail());
                        lookup.set(PreviewLookup::Failed);
                    }
                }
            });
        } else {
            lookup.set(PreviewLookup::Idle);
        }
    };

    let back_to_rules = move |_| {
        phase.set(Phase::Rules);
    };

    // Guess history stays visible on the result screen, so it renders in
    // both the Playing and Result arms.
    let history = move || {
        session.with(|s| {
            s.history
                .iter()
                .map(|rec| guess_row(&feedback::row_from_feedback(&rec.result), palette))
                .collect_view()
        })
    };

    view! {
        <div class=format!("game {}", palette.theme_class())>
            <h1 class="game-title">"中文四字词语猜词游戏"</h1>

            {move || match phase.get() {
                Phase::Rules => {
                    view! {
                        <div class="rules">
                            <h2>"游戏规则"</h2>
                            <p>
                                "猜一个四字词语，机会有限。每次猜测后，汉字、拼音、声调会分别给出颜色提示："
                            </p>
                            <ul class="legend-list">
                                <li>
                                    <span class="legend correct"></span>
                                    " 位置和内容都正确"
                                </li>
                                <li>
                                    <span class="legend present"></span>
                                    " 内容存在但位置错误"
                                </li>
                                <li>
                                    <span class="legend absent"></span>
                                    " 不存在于答案中"
                                </li>
                            </ul>
                            <button class="primary" on:click=start_game>
                                "开始游戏"
                            </button>
                        </div>
                    }
                        .into_any()
                }
                Phase::Playing => {
                    view! {
                        <div class="game-grid">
                            <div class="guess-history">{history}</div>
                            <div class="current-guess">
                                {move || {
                                    feedback::preview_row(&input.get(), &lookup.get())
                                        .iter()
                                        .map(preview_block)
                                        .collect_view()
                                }}
                            </div>
                            <div class="input-area">
                                <p class="attempt-info">
                                    {move || session.with(|s| s.attempt_label())}
                                </p>
                                <form on:submit=submit_guess>
                                    <input
                                        type="text"
                                        node_ref=input_ref
                                        placeholder="请输入四字词语"
                                        prop:value=move || input.get()
                                        on:input=move |ev| handle_input(event_target_value(&ev))
                                    />
                                    <button type="submit" class="primary">
                                        "提交"
                                    </button>
                                </form>
                            </div>
                        </div>
                    }
                        .into_any()
                }
                Phase::Result => {
                    view! {
                        <div class="game-grid">
                            <div class="guess-history">{history}</div>
                        </div>
                        <div class="game-result">
                            {move || {
                                final_result
                                    .with(|r| match r {
                                        Some(resp) => result_panel(resp, palette),
                                        None => view! {}.into_any(),
                                    })
                            }}
                            <button class="primary" on:click=back_to_rules>
                                "再来一局"
                            </button>
                        </div>
                    }
                        .into_any()
                }
            }}

            {move || {
                (in_flight.get() > 0)
                    .then(|| {
                        view! {
                            <div class="loading">
                                <div class="spinner"></div>
                                <p>"加载中..."</p>
                            </div>
                        }
                    })
            }}

            <div
                class=move || if toast.get().is_some() { "toast show" } else { "toast" }
                on:click=move |_| toast.set(None)
            >
                {move || toast.get().unwrap_or_default()}
            </div>
        </div>
    }
}

/// Win/loss headline, the server's message verbatim, and (on loss only) the
/// revealed answer with every sub-field marked exact-match.
fn result_panel(resp: &GuessResponse, palette: Palette) -> AnyView {
    let (title, color) = if resp.won {
        ("🎉 恭喜获胜！", palette.hex(Tile::Correct))
    } else {
        ("😞 游戏结束", palette.hex(Tile::Absent))
    };
    let message = resp.message.clone().unwrap_or_default();
    let answer = if resp.won {
        None
    } else {
        resp.target_details.clone()
    };
    view! {
        <h2 class="result-title" style=format!("color: {color}")>{title}</h2>
        <p class="result-message">{message}</p>
        {answer
            .map(|details| {
                view! {
                    <div class="answer-details">
                        <h3>"正确答案"</h3>
                        {guess_row(&feedback::row_from_answer(&details), palette)}
                    </div>
                }
            })}
    }
        .into_any()
}

fn guess_row(tiles: &[CharTile], palette: Palette) -> impl IntoView {
    view! {
        <div class="guess-row">
            {tiles.iter().map(|t| char_block(t, palette)).collect_view()}
        </div>
    }
}

fn char_block(tile: &CharTile, palette: Palette) -> impl IntoView {
    let tone = match tile.tone {
        Some(t) => {
            view! {
                <div class="tone" style=format!("color: {}", palette.hex(t))>
                    {tile.tone_text.clone()}
                </div>
            }
                .into_any()
        }
        None => view! { <div class="tone">{tile.tone_text.clone()}</div> }.into_any(),
    };
    view! {
        <div class=format!("char-block filled {}", tile.block.class())>
            <div class="char">{tile.glyph.clone()}</div>
            {pinyin_view(tile, palette)}
            {tone}
        </div>
    }
}

/// Uniformly colored pinyin stays a single node; mixed feedback wraps each
/// letter so the difference is visible letter by letter.
fn pinyin_view(tile: &CharTile, palette: Palette) -> impl IntoView {
    match &tile.pinyin {
        None => view! { <div class="pinyin">{tile.pinyin_text.clone()}</div> }.into_any(),
        Some(TextColoring::Uniform(t)) => {
            view! {
                <div class="pinyin" style=format!("color: {}", palette.hex(*t))>
                    {tile.pinyin_text.clone()}
                </div>
            }
                .into_any()
        }
        Some(TextColoring::Mixed(letters)) => {
            view! {
                <div class="pinyin">
                    {letters
                        .iter()
                        .map(|(ch, t)| {
                            view! {
                                <span style=format!(
                                    "color: {}",
                                    palette.hex(*t),
                                )>{ch.to_string()}</span>
                            }
                        })
                        .collect_view()}
                </div>
            }
                .into_any()
        }
    }
}

fn preview_block(cell: &PreviewCell) -> impl IntoView {
    let class = if cell.filled {
        "char-block filled"
    } else {
        "char-block"
    };
    view! {
        <div class=class>
            <div class="char">{cell.glyph.clone()}</div>
            <div class="pinyin">{cell.pinyin.clone()}</div>
            <div class="tone">{cell.tone.clone()}</div>
        </div>
    }
}
