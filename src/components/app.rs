use super::{
    end_screen::EndScreen, guess_button::GuessButton, guess_map::GuessMapView,
    photo_view::PhotoView, scoreboard::ScoreboardPanel, timer_bar::TimerBar,
};
use crate::config::GameConfig;
use crate::feed;
use crate::model::{Coordinate, GameAction, GameState, Round};
use crate::state::Phase;
use crate::util::{cerror, photo_url};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use yew::prelude::*;

#[function_component(App)]
pub fn app() -> Html {
    let config = use_memo((), |_| GameConfig::load_from_page());
    // Each "Play Again" reshuffles the catalog into a fresh session.
    let game_no = use_state(|| 0_u32);
    let rounds = {
        let config = config.clone();
        use_memo(*game_no, move |_| feed::load_rounds_from_page(config.total_rounds))
    };
    let play_again = {
        let game_no = game_no.clone();
        Callback::from(move |_: ()| game_no.set(*game_no + 1))
    };

    match &*rounds {
        Ok(rounds) => html! {
            <GameView key={*game_no} config={(*config).clone()} rounds={rounds.clone()} {play_again} />
        },
        Err(e) => {
            cerror(&format!("cannot start a game: {}", e));
            html! {
                <div style="padding:32px; color:#f85149;">
                    <h2>{"Campus Guessr is unavailable"}</h2>
                    <p>{ e.to_string() }</p>
                </div>
            }
        }
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct GameViewProps {
    pub config: GameConfig,
    pub rounds: Vec<Round>,
    pub play_again: Callback<()>,
}

#[function_component(GameView)]
pub fn game_view(props: &GameViewProps) -> Html {
    let game = {
        let config = props.config.clone();
        let rounds = props.rounds.clone();
        use_reducer(move || GameState::new(config, rounds))
    };
    let map_expanded = use_state(|| false);

    // Countdown interval: one per timer generation, cleared as soon as it stops running.
    {
        let countdown = game.machine.countdown();
        let interval = countdown.interval_millis();
        let dispatcher = game.dispatcher();
        use_effect_with(
            (countdown.generation, countdown.is_running()),
            move |&(generation, running)| {
                let window = web_sys::window();
                let tick = Closure::wrap(Box::new(move || {
                    dispatcher.dispatch(GameAction::TimerTick { generation })
                }) as Box<dyn FnMut()>);
                let handle = match (&window, running) {
                    (Some(w), true) => w
                        .set_interval_with_callback_and_timeout_and_arguments_0(
                            tick.as_ref().unchecked_ref(),
                            interval,
                        )
                        .ok(),
                    _ => None,
                };
                move || {
                    if let (Some(w), Some(id)) = (window, handle) {
                        w.clear_interval_with_handle(id);
                    }
                    drop(tick);
                }
            },
        );
    }

    // Photo loaded: give it a moment on screen, then open the round.
    let on_photo_loaded = {
        let dispatcher = game.dispatcher();
        let delay = props.config.reveal_delay_millis();
        Callback::from(move |_: ()| {
            let dispatcher = dispatcher.clone();
            let open = Closure::once_into_js(move || dispatcher.dispatch(GameAction::RoundReady));
            let scheduled = web_sys::window().and_then(|w| {
                w.set_timeout_with_callback_and_timeout_and_arguments_0(open.unchecked_ref(), delay)
                    .ok()
            });
            if scheduled.is_none() {
                cerror("could not schedule round start");
            }
        })
    };

    let on_map_click = {
        let dispatcher = game.dispatcher();
        Callback::from(move |at: Coordinate| dispatcher.dispatch(GameAction::MapClick(at)))
    };
    let on_expand = {
        let map_expanded = map_expanded.clone();
        Callback::from(move |flag: bool| map_expanded.set(flag))
    };

    let phase = game.machine.phase();
    let on_press = {
        let dispatcher = game.dispatcher();
        Callback::from(move |_: ()| match phase {
            Phase::AwaitingGuess => dispatcher.dispatch(GameAction::Submit),
            Phase::Scored => dispatcher.dispatch(GameAction::NextRound),
            Phase::Transitioning | Phase::GameOver => {}
        })
    };

    let view = &game.view;
    let game_over = game.machine.is_game_over();
    let photo_src = view
        .photo_id
        .as_ref()
        .map(|id| photo_url(&props.config.photo_url_template, id));

    html! {
        <div style="position:relative; width:100vw; height:100vh; overflow:hidden; background:#0e1116; color:#e6edf3; font-family:sans-serif;">
            <PhotoView src={photo_src} shown={phase != Phase::Transitioning && !game_over} on_loaded={on_photo_loaded} />
            <TimerBar percent={view.timer_width} />
            <ScoreboardPanel board={view.scoreboard.clone()} visible={!game_over} />
            <GuessMapView
                config={props.config.map.clone()}
                markers={view.markers.clone()}
                markers_rev={view.markers_rev}
                hidden={game_over}
                accepting={game.machine.accepting_guesses()}
                on_click={on_map_click}
                {on_expand}
            />
            { if game_over { html!{} } else { html!{
                <GuessButton label={view.button_label.clone()} enabled={view.button_enabled} wide={*map_expanded} {on_press} />
            } } }
            { if let Some((cumulative, maximum)) = view.end_screen { html!{
                <EndScreen {cumulative} {maximum}
                    round_scores={game.machine.session().rounds().iter().map(|r| r.score.unwrap_or(0)).collect::<Vec<u32>>()}
                    upload_url={props.config.upload_url.clone()}
                    leaderboard_url={props.config.leaderboard_url.clone()}
                    play_again={props.play_again.clone()} />
            } } else { html!{} } }
        </div>
    }
}
