use async_trait::async_trait;
use magic_shop_core::{
    Command,
    cue::SoundCue,
    driver::GameDriver,
    game::{GameController, Screen, UiAction},
    llm_client::ShopkeeperClient,
    prompt::DEFAULT_SYSTEM_TEMPLATE,
    session::{Sender, TurnRequest},
};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Replies from a fixed script and records every request it saw.
struct ScriptedShopkeeper {
    replies: Mutex<VecDeque<&'static str>>,
    seen: Mutex<Vec<TurnRequest>>,
}

impl ScriptedShopkeeper {
    fn new(replies: &[&'static str]) -> Self {
        Self {
            replies: Mutex::new(replies.iter().copied().collect()),
            seen: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl ShopkeeperClient for ScriptedShopkeeper {
    async fn reply(&self, request: TurnRequest) -> anyhow::Result<String> {
        self.seen.lock().unwrap().push(request);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .map(str::to_string)
            .ok_or_else(|| anyhow::anyhow!("script exhausted"))
    }
}

#[tokio::test(start_paused = true)]
async fn test_complete_game_from_welcome_to_celebration() {
    let shopkeeper = Arc::new(ScriptedShopkeeper::new(&[
        "Oh! For milk, we say 'a little milk'. Try again! 🥛",
        "Here you go! That's 2.10 euros. 🥛",
        "Great! A few apples are 0.80 euros. Here you go! 🍎",
        "Wow! Here you go! 🍬",
    ]));
    let controller = GameController::new(DEFAULT_SYSTEM_TEMPLATE)
        .with_celebration_delay(Duration::from_millis(1000));
    let (mut driver, mut events) = GameDriver::new(controller, shopkeeper.clone());

    assert_eq!(driver.controller().screen(), Screen::Welcome);
    driver.handle(UiAction::StartGame).unwrap();

    let script = [
        "I want a few milk, how much?",
        "I would like a little milk. How much is it?",
        "How much are a few apples?",
        "a lot of sweets please, how much?",
    ];
    let mut outputs = Vec::new();
    for line in script {
        driver.handle(UiAction::SetInput(line.to_string())).unwrap();
        driver.handle(UiAction::Submit).unwrap();
        let event = events.recv().await.unwrap();
        outputs.push(driver.apply(event));
    }

    // The correction turn did not count even though it contained "a few".
    let seen = shopkeeper.seen.lock().unwrap();
    assert_eq!(seen.len(), 4);
    assert_eq!(seen[0].history.len(), 1);
    assert_eq!(seen[3].history.len(), 7);
    drop(seen);

    // Correction: speech only. Sales: speech plus a success cue, until the last one.
    assert_eq!(outputs[0].len(), 1);
    assert_eq!(outputs[1][1], Command::PlayCue(SoundCue::Success));
    assert_eq!(outputs[2][1], Command::PlayCue(SoundCue::Success));
    assert!(matches!(outputs[3].as_slice(), [Command::Speak { .. }]));
    let event = events.recv().await.unwrap();
    let celebration = driver.apply(event);
    assert_eq!(
        celebration,
        vec![Command::ShowCelebration, Command::PlayCue(SoundCue::Win)]
    );

    let snapshot = driver.controller().snapshot();
    assert!(snapshot.celebration);
    assert_eq!(snapshot.messages.len(), 9);
    assert_eq!(snapshot.messages.last().unwrap().sender, Sender::Shopkeeper);
    assert!(snapshot.missions.iter().all(|m| m.completed));

    driver.handle(UiAction::PlayAgain).unwrap();
    let snapshot = driver.controller().snapshot();
    assert!(!snapshot.celebration);
    assert_eq!(snapshot.messages.len(), 1);
}
