use gloo::timers::callback::Interval;
use memorito_core as game;
use memorito_core::{BoardConfig, DifficultyPolicy, PlayerProfile};
use yew::prelude::*;

use crate::host::{AlertNotifier, BrowserStore, LinkScheduler};
use crate::theme;
use crate::utils::*;

/// Difficulty policy picked at startup.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Policy {
    Adaptive,
    Static,
}

impl DifficultyPolicy for Policy {
    fn board_config(&self, profile: &PlayerProfile) -> BoardConfig {
        match self {
            Self::Adaptive => game::AdaptivePolicy.board_config(profile),
            Self::Static => game::StaticPolicy.board_config(profile),
        }
    }
}

type Session = game::GameSession<BrowserStore, Policy>;

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    Flip(game::CardIndex),
    Task(game::ScheduledTask),
    UpdateTime,
    NewGame,
}

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct GameProps {
    #[prop_or_default]
    pub seed: Option<u64>,
    pub policy: Policy,
}

#[derive(Properties, Clone, PartialEq)]
struct CardProps {
    index: game::CardIndex,
    card: game::Card,
    callback: Callback<game::CardIndex>,
}

#[function_component(Card)]
fn card_component(props: &CardProps) -> Html {
    use game::CardFace::*;

    let CardProps {
        index,
        card,
        callback,
    } = props.clone();
    let class = classes!(
        "card",
        match card.face() {
            FaceDown => classes!(),
            FaceUp => classes!("flipped"),
            Matched => classes!("flipped", "matched"),
        }
    );
    let onclick = Callback::from(move |_: MouseEvent| {
        log::trace!("card {} clicked", index);
        callback.emit(index);
    });

    html! {
        <div {class} {onclick} data-token={card.token().name()}>
            { if card.is_revealed() { card.token().glyph() } else { "" } }
        </div>
    }
}

pub(crate) struct GameView {
    session: Option<Session>,
    forced_seed: Option<u64>,
    prev_time: game::Seconds,
    _timer_interval: Interval,
}

impl GameView {
    fn next_seed(&self) -> u64 {
        self.forced_seed.unwrap_or_else(js_random_seed)
    }

    fn create_timer(ctx: &Context<Self>) -> Interval {
        let link = ctx.link().clone();
        Interval::new(500, move || link.send_message(Msg::UpdateTime))
    }

    fn get_time(&self) -> game::Seconds {
        self.session
            .as_ref()
            .map_or(0, |session| session.elapsed_secs(utc_now()))
    }

    fn get_moves(&self) -> game::MoveCount {
        self.session.as_ref().map_or(0, |session| session.move_count())
    }

    fn get_game_state_class(&self) -> Classes {
        use game::EnginePhase::*;
        classes!(match self.session.as_ref().map(|session| session.phase()) {
            None | Some(Idle) => "idle",
            Some(OneSelected) => "one-selected",
            Some(Resolving) => "resolving",
            Some(Won) => "won",
        })
    }

    fn apply_board_theme(&self) {
        if let Some(session) = &self.session {
            theme::apply_flip_speed(session.config().flip_speed_ms);
        }
    }

    fn flip(&mut self, ctx: &Context<Self>, index: game::CardIndex) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        let mut scheduler = LinkScheduler::new(ctx.link());
        match session.flip(index, utc_now(), &mut scheduler) {
            Ok(outcome) => outcome.has_update(),
            Err(err) => {
                log::error!("flip at {} failed: {}", index, err);
                false
            }
        }
    }

    fn new_game(&mut self) -> bool {
        let seed = self.next_seed();
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        if let Err(err) = session.new_game(seed, local_time_of_day()) {
            log::error!("Could not deal a new game: {}", err);
            return false;
        }
        self.apply_board_theme();
        true
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let GameProps { seed, policy } = ctx.props().clone();
        let session_seed = seed.unwrap_or_else(js_random_seed);
        let session = match Session::new(BrowserStore, policy, session_seed, local_time_of_day()) {
            Ok(session) => Some(session),
            Err(err) => {
                log::error!("Could not start a game: {}", err);
                None
            }
        };

        let view = Self {
            session,
            forced_seed: seed,
            prev_time: 0,
            _timer_interval: GameView::create_timer(ctx),
        };
        view.apply_board_theme();
        view
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        match msg {
            Flip(index) => {
                log::debug!("flip card: {}", index);
                self.flip(ctx, index)
            }
            Task(task) => self
                .session
                .as_mut()
                .is_some_and(|session| session.run_task(task, &mut AlertNotifier)),
            UpdateTime => {
                let time = self.get_time();
                if self.prev_time != time {
                    self.prev_time = time;
                    true
                } else {
                    false
                }
            }
            NewGame => {
                self.prev_time = 0;
                self.new_game()
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let Some(session) = &self.session else {
            return html! { <div class="memorito">{"Could not start a game"}</div> };
        };

        let moves = self.get_moves().to_string();
        let elapsed_time = game::format_elapsed(self.get_time());
        let game_state_class = self.get_game_state_class();
        let cb_new_game = ctx.link().callback(|_: MouseEvent| Msg::NewGame);
        let callback = ctx.link().callback(Msg::Flip);

        html! {
            <div class="memorito">
                <nav>
                    <aside id="moveCount">{moves}</aside>
                    <span><button class={game_state_class} onclick={cb_new_game}/></span>
                    <aside id="timer">{elapsed_time}</aside>
                </nav>
                <section id="gameBoard">
                    {
                        for session.board().iter().map(|(index, &card)| {
                            let callback = callback.clone();
                            html! { <Card {index} {card} {callback}/> }
                        })
                    }
                </section>
            </div>
        }
    }
}
