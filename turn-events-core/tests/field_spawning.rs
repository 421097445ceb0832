use std::io;
use std::sync::{Arc, Mutex};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing_subscriber::fmt::MakeWriter;
use turn_events_core::{
    FieldSpawner, FieldType, ObjectId, Position, RngCore, TurnOutcome, UniverseHost,
};

/// Buffer that collects formatted `tracing` output.
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

fn with_captured_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(logs.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::INFO)
        .finish();
    let result = tracing::subscriber::with_default(subscriber, f);
    (result, logs.contents())
}

/// Draws that always land at the top of [0, 1).
struct HighRng;

impl RngCore for HighRng {
    fn next_u32(&mut self) -> u32 {
        u32::MAX
    }

    fn next_u64(&mut self) -> u64 {
        u64::MAX
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        dest.fill(0xff);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

struct TestUniverse {
    turn: u32,
    width: f64,
    accept: bool,
    created: Vec<(FieldType, Position, f64)>,
}

impl TestUniverse {
    fn new(width: f64) -> Self {
        Self {
            turn: 1,
            width,
            accept: true,
            created: Vec::new(),
        }
    }

    fn failing(width: f64) -> Self {
        Self {
            accept: false,
            ..Self::new(width)
        }
    }
}

impl UniverseHost for TestUniverse {
    fn current_turn(&self) -> u32 {
        self.turn
    }

    fn universe_width(&self) -> f64 {
        self.width
    }

    fn create_field(&mut self, field_type: FieldType, x: f64, y: f64, size: f64) -> ObjectId {
        self.created.push((field_type, Position::new(x, y), size));
        if self.accept {
            ObjectId(self.created.len() as i32)
        } else {
            ObjectId::INVALID
        }
    }
}

#[test]
fn spawn_points_lie_on_ring_outside_universe() {
    let spawner = FieldSpawner::default();
    let mut rng = ChaCha8Rng::seed_from_u64(0xf1e1d);

    for width in [100.0, 500.0, 1000.0, 4321.0] {
        let mut universe = TestUniverse::new(width);
        for _ in 0..2_000 {
            spawner.execute(&mut universe, &mut rng);
        }
        assert!(!universe.created.is_empty(), "width {width} never spawned");

        let center = Position::new(width / 2.0, width / 2.0);
        for (_, position, _) in &universe.created {
            let distance = position.distance_to(&center);
            assert!(
                distance >= width / 2.0 + 150.0 - 1e-9 && distance <= width / 2.0 + 200.0 + 1e-9,
                "width {width}: distance {distance} outside ring"
            );
        }
    }
}

#[test]
fn molecular_clouds_are_roughly_three_in_ten() {
    let spawner = FieldSpawner::default();
    let mut rng = ChaCha8Rng::seed_from_u64(1234);
    let mut universe = TestUniverse::new(1000.0);

    for _ in 0..50_000 {
        spawner.execute(&mut universe, &mut rng);
    }

    let spawned = universe.created.len() as f64;
    let clouds = universe
        .created
        .iter()
        .filter(|(field_type, _, _)| *field_type == FieldType::MolecularCloud)
        .count() as f64;
    let cloud_share = clouds / spawned;
    assert!((cloud_share - 0.3).abs() < 0.03, "cloud share {cloud_share}");

    // Spawn rate at width 1000 is 0.2.
    let spawn_rate = spawned / 50_000.0;
    assert!((spawn_rate - 0.2).abs() < 0.02, "spawn rate {spawn_rate}");

    for (field_type, _, size) in &universe.created {
        match field_type {
            FieldType::MolecularCloud => assert_eq!(*size, 120.0),
            FieldType::IonStorm => assert_eq!(*size, 50.0),
        }
    }
}

#[test]
fn failing_host_logs_one_diagnostic_per_attempt() {
    let spawner = FieldSpawner::default();
    // Width 10000 puts the spawn probability above 1, so every turn attempts a spawn.
    let mut universe = TestUniverse::failing(10_000.0);
    let mut rng = ChaCha8Rng::seed_from_u64(99);

    let (completed, logs) = with_captured_logs(|| {
        (0..5)
            .map(|_| spawner.run(&mut universe, &mut rng))
            .collect::<Vec<_>>()
    });

    assert_eq!(completed, vec![true; 5]);
    assert_eq!(universe.created.len(), 5);
    assert_eq!(
        logs.matches("Turn events: couldn't create new field").count(),
        5
    );
    assert_eq!(logs.matches("Executing turn events for turn 1").count(), 5);
}

#[test]
fn losing_spawn_roll_never_contacts_host() {
    let spawner = FieldSpawner::default();
    let mut universe = TestUniverse::new(1000.0);

    let (outcomes, logs) = with_captured_logs(|| {
        (0..10)
            .map(|_| spawner.execute(&mut universe, &mut HighRng))
            .collect::<Vec<_>>()
    });

    assert!(outcomes.iter().all(TurnOutcome::is_quiet));
    assert!(universe.created.is_empty());
    assert!(!logs.contains("creating new"));
    assert!(!logs.contains("couldn't create new field"));
    assert_eq!(logs.matches("Executing turn events for turn").count(), 10);
}

#[test]
fn successful_spawn_logs_type_and_position() {
    let spawner = FieldSpawner::default();
    let mut universe = TestUniverse::new(10_000.0);
    universe.turn = 17;
    let mut rng = ChaCha8Rng::seed_from_u64(5);

    let (outcome, logs) = with_captured_logs(|| spawner.execute(&mut universe, &mut rng));

    let spec = outcome.spec().copied().expect("probability above 1 always spawns");
    let position = outcome.position().unwrap();
    assert!(logs.contains("Executing turn events for turn 17"));
    assert!(logs.contains(&format!(
        "...creating new {} field at: {} / {}",
        spec.field_type, position.x, position.y
    )));
    assert!(!logs.contains("couldn't create new field"));
}
