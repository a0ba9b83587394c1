use styletrend_dom::{parse_html, Document};
use styletrend_regen::runtime::RegenDriver;
use styletrend_regen::{ManualClock, RegenOptions, RegenState, RegenerationSimulator};
use tokio::sync::mpsc;
use tokio::time::{sleep, Duration};

const PAGE: &str = r#"<body>
    <div class="minimal-img-wrapper">
        <img src="https://loremflickr.com/400/600/jacket?random=3">
        <div class="generating-overlay"></div>
        <button class="redesign-btn">Redesign</button>
    </div>
</body>"#;

fn setup() -> (Document, RegenerationSimulator) {
    let doc = parse_html(PAGE).unwrap();
    let sim = RegenerationSimulator::discover(&doc, RegenOptions::default()).unwrap();
    (doc, sim)
}

#[tokio::test(start_paused = true)]
async fn fallback_clears_overlay_without_load_event() {
    let (mut doc, mut sim) = setup();
    let clock = ManualClock::new(1_234);
    let driver = RegenDriver::new();
    let (_tx, mut rx) = mpsc::channel(4);

    assert!(driver.click(&mut sim, &mut doc, 0).unwrap());
    driver
        .run_until_idle(&mut sim, &mut doc, &clock, &mut rx)
        .await
        .unwrap();

    let group = &sim.groups()[0];
    assert_eq!(group.state(), RegenState::Idle);
    assert_eq!(group.cleared_at(), Some(3000));
    assert_eq!(
        doc.get_attribute(group.image, "src"),
        Some("https://loremflickr.com/400/600/jacket?random=1234")
    );
    assert!(!doc.has_class(group.overlay, "active"));
}

#[tokio::test(start_paused = true)]
async fn load_event_clears_overlay_early() {
    let (mut doc, mut sim) = setup();
    let clock = ManualClock::new(99);
    let driver = RegenDriver::new();
    let image = sim.groups()[0].image;
    let (tx, mut rx) = mpsc::channel(4);

    driver.click(&mut sim, &mut doc, 0).unwrap();
    tokio::spawn(async move {
        sleep(Duration::from_millis(2400)).await;
        tx.send(image).await.unwrap();
    });

    driver
        .run_until_idle(&mut sim, &mut doc, &clock, &mut rx)
        .await
        .unwrap();

    let cleared = sim.groups()[0].cleared_at().unwrap();
    assert_eq!(cleared, 2400);
}

#[tokio::test(start_paused = true)]
async fn idle_simulator_returns_immediately() {
    let (mut doc, mut sim) = setup();
    let driver = RegenDriver::new();
    let (_tx, mut rx) = mpsc::channel(1);

    driver
        .run_until_idle(&mut sim, &mut doc, &ManualClock::default(), &mut rx)
        .await
        .unwrap();

    assert_eq!(driver.now_ms(), 0);
    assert_eq!(sim.groups()[0].cleared_at(), None);
}
