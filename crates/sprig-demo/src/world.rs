//! Game rules of the demo, independent of rendering.
//!
//! The world never touches the scene directly. Every change it makes is
//! appended to a caller-owned `Vec<Message>` that the frame loop drains into
//! the view once per frame.

use sprig_engine::coords::{WorldPoint, WorldVector};
use sprig_engine::input::Key;

const TIME_TO_SPEED_UP: f32 = 0.3;
const TIME_TO_STOP: f32 = 0.2;
const MAX_SPEED: f32 = 5.0;
const ACCELERATION: f32 = MAX_SPEED / TIME_TO_SPEED_UP;
const DECELERATION: f32 = MAX_SPEED / TIME_TO_STOP;

const BULLET_SPEED: f32 = 10.0;
const BULLET_LIFETIME: f32 = 1.0;
const HIT_DISTANCE: f32 = 0.6;
/// Obstacles keep the hero at least this far away.
const OBSTACLE_RADIUS: f32 = 1.0;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ObjectType {
    None,
    Grass,
    Road,
    Tree,
    Stone,
    Hero,
    Bullet,
}

/// Change notification for the view.
///
/// A message for an unknown id introduces a new object of `kind`; later
/// messages move it, and one with `alive == false` removes it.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Message {
    pub object_id: u64,
    pub kind: ObjectType,
    pub alive: bool,
    pub position: WorldPoint,
}

impl Message {
    fn moved(object_id: u64, position: WorldPoint) -> Self {
        Self { object_id, kind: ObjectType::None, alive: true, position }
    }

    fn dead(object_id: u64) -> Self {
        Self { object_id, kind: ObjectType::None, alive: false, position: WorldPoint::origin() }
    }
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Control {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl Control {
    /// Unit direction of the held keys, or zero.
    pub fn direction(self) -> WorldVector {
        let axis = |neg: bool, pos: bool| (pos as i8 - neg as i8) as f32;
        WorldVector::new(axis(self.left, self.right), axis(self.down, self.up)).normalized()
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Obstacle {
    id: u64,
    position: WorldPoint,
}

#[derive(Debug, Clone, PartialEq)]
struct Bullet {
    id: u64,
    position: WorldPoint,
    velocity: WorldVector,
    age: f32,
}

#[derive(Debug, Default)]
pub struct World {
    pub hero_position: WorldPoint,
    pub hero_velocity: WorldVector,
    pub control: Control,
    obstacles: Vec<Obstacle>,
    bullets: Vec<Bullet>,
    next_id: u64,
}

const MAP: [&str; 11] = [
    "TTTTTRTTTTT",
    "TGGGGRGGGGT",
    "TGGSGRGGGGT",
    "TGGGGRRGGGT",
    "TGGGGGRGGGT",
    "TGGTGGRGGGT",
    "TGGGGGRRRGT",
    "TGGGGSGGRGT",
    "TGGGGGGGRGT",
    "TGGGGGGGRGT",
    "TTTTTTTTRTT",
];

fn tile(c: char) -> ObjectType {
    match c {
        'T' => ObjectType::Tree,
        'S' => ObjectType::Stone,
        'R' => ObjectType::Road,
        'G' => ObjectType::Grass,
        _ => ObjectType::None,
    }
}

impl World {
    /// The demo map: trees and stones around the origin, the hero in the middle.
    pub fn new(messages: &mut Vec<Message>) -> Self {
        let mut world = Self::default();
        for (i, row) in MAP.iter().enumerate() {
            for (j, c) in row.chars().enumerate() {
                let kind = tile(c);
                if matches!(kind, ObjectType::Tree | ObjectType::Stone) {
                    let position = WorldPoint::new(j as f32 - 5.0, 5.0 - i as f32);
                    world.add_obstacle(kind, position, messages);
                }
            }
        }
        world
    }

    pub fn add_obstacle(
        &mut self,
        kind: ObjectType,
        position: WorldPoint,
        messages: &mut Vec<Message>,
    ) -> u64 {
        let id = self.allocate_id();
        self.obstacles.push(Obstacle { id, position });
        messages.push(Message { object_id: id, kind, alive: true, position });
        id
    }

    pub fn obstacle_count(&self) -> usize {
        self.obstacles.len()
    }

    pub fn bullet_count(&self) -> usize {
        self.bullets.len()
    }

    fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Updates movement keys. Returns `true` if `key` is a movement key.
    pub fn handle_key(&mut self, key: Key, pressed: bool) -> bool {
        let flag = match key {
            Key::A => &mut self.control.left,
            Key::D => &mut self.control.right,
            Key::W => &mut self.control.up,
            Key::S => &mut self.control.down,
            _ => return false,
        };
        *flag = pressed;
        true
    }

    pub fn shoot_in_direction_of(&mut self, target: WorldPoint, messages: &mut Vec<Message>) {
        let velocity = (target - self.hero_position).resized(BULLET_SPEED);
        if velocity.is_zero() {
            return;
        }
        let id = self.allocate_id();
        let position = self.hero_position;
        self.bullets.push(Bullet { id, position, velocity, age: 0.0 });
        messages.push(Message { object_id: id, kind: ObjectType::Bullet, alive: true, position });
    }

    pub fn update(&mut self, delta: f32, messages: &mut Vec<Message>) {
        self.move_hero(delta);
        self.move_bullets(delta, messages);
    }

    fn move_hero(&mut self, delta: f32) {
        self.hero_velocity += self.control.direction() * ((ACCELERATION + DECELERATION) * delta);
        let speed = self.hero_velocity.length();
        if speed != 0.0 {
            let slowed = (speed - DECELERATION * delta).clamp(0.0, MAX_SPEED);
            self.hero_velocity = self.hero_velocity * (slowed / speed);
        }
        self.hero_position += self.hero_velocity * delta;

        for obstacle in &self.obstacles {
            let d = self.hero_position.distance(obstacle.position);
            if d < OBSTACLE_RADIUS {
                let push = (self.hero_position - obstacle.position).resized(OBSTACLE_RADIUS - d);
                self.hero_position += push;
            }
        }
    }

    fn move_bullets(&mut self, delta: f32, messages: &mut Vec<Message>) {
        let mut i = 0;
        while i < self.bullets.len() {
            let bullet = &mut self.bullets[i];
            bullet.position += bullet.velocity * delta;
            bullet.age += delta;
            let (id, position, age) = (bullet.id, bullet.position, bullet.age);
            messages.push(Message::moved(id, position));

            let before = self.obstacles.len();
            self.obstacles.retain(|o| {
                let hit = position.distance(o.position) < HIT_DISTANCE;
                if hit {
                    messages.push(Message::dead(o.id));
                }
                !hit
            });
            let collision = self.obstacles.len() != before;

            if collision || age > BULLET_LIFETIME {
                messages.push(Message::dead(id));
                self.bullets.swap_remove(i);
            } else {
                i += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn w(x: f32, y: f32) -> WorldPoint {
        WorldPoint::new(x, y)
    }

    fn run(world: &mut World, seconds: f32, messages: &mut Vec<Message>) {
        let steps = (seconds * 60.0).round() as usize;
        for _ in 0..steps {
            world.update(1.0 / 60.0, messages);
        }
    }

    // ── map ───────────────────────────────────────────────────────────────

    #[test]
    fn map_spawns_trees_and_stones_only() {
        let mut messages = Vec::new();
        let world = World::new(&mut messages);
        assert_eq!(world.obstacle_count(), 41);
        assert_eq!(messages.len(), 41);
        assert_eq!(messages[0].position, w(-5.0, 5.0));
        assert_eq!(messages[0].kind, ObjectType::Tree);
        let stones: Vec<_> =
            messages.iter().filter(|m| m.kind == ObjectType::Stone).map(|m| m.position).collect();
        assert_eq!(stones, vec![w(-2.0, 3.0), w(0.0, -2.0)]);
    }

    // ── hero ──────────────────────────────────────────────────────────────

    #[test]
    fn movement_keys_drive_control() {
        let mut world = World::default();
        assert!(world.handle_key(Key::D, true));
        assert!(world.handle_key(Key::W, true));
        assert!(!world.handle_key(Key::Q, true));
        let dir = world.control.direction();
        assert!((dir.length() - 1.0).abs() < 1e-6);
        assert!(dir.x > 0.0 && dir.y > 0.0);
    }

    #[test]
    fn hero_reaches_max_speed_and_stops() {
        let mut world = World::default();
        let mut messages = Vec::new();
        world.handle_key(Key::D, true);
        run(&mut world, 1.0, &mut messages);
        assert!((world.hero_velocity.length() - MAX_SPEED).abs() < 1e-3);
        assert!(world.hero_position.x > 2.0);

        world.handle_key(Key::D, false);
        run(&mut world, TIME_TO_STOP + 0.05, &mut messages);
        assert_eq!(world.hero_velocity.length(), 0.0);
        assert!(messages.is_empty());
    }

    #[test]
    fn obstacles_push_the_hero_out() {
        let mut world = World::default();
        let mut messages = Vec::new();
        world.add_obstacle(ObjectType::Stone, w(0.5, 0.0), &mut messages);
        world.update(1.0 / 60.0, &mut messages);
        assert!(world.hero_position.distance(w(-0.5, 0.0)) < 1e-5);
    }

    // ── bullets ───────────────────────────────────────────────────────────

    #[test]
    fn shooting_spawns_bullet_towards_target() {
        let mut world = World::default();
        let mut messages = Vec::new();
        world.shoot_in_direction_of(w(3.0, 4.0), &mut messages);
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].kind, ObjectType::Bullet);

        messages.clear();
        world.update(0.1, &mut messages);
        assert_eq!(messages.len(), 1);
        assert!(messages[0].alive);
        assert!(messages[0].position.distance(w(0.6, 0.8)) < 1e-5);
    }

    #[test]
    fn shooting_at_the_hero_does_nothing() {
        let mut world = World::default();
        let mut messages = Vec::new();
        world.shoot_in_direction_of(world.hero_position, &mut messages);
        assert!(messages.is_empty());
        assert_eq!(world.bullet_count(), 0);
    }

    #[test]
    fn bullet_expires() {
        let mut world = World::default();
        let mut messages = Vec::new();
        world.shoot_in_direction_of(w(0.0, 1.0), &mut messages);
        run(&mut world, 1.1, &mut messages);
        assert_eq!(world.bullet_count(), 0);
        assert_eq!(messages.last(), Some(&Message::dead(0)));
    }

    #[test]
    fn bullet_destroys_what_it_hits() {
        let mut world = World::default();
        let mut messages = Vec::new();
        let stone = world.add_obstacle(ObjectType::Stone, w(1.0, 0.0), &mut messages);
        world.shoot_in_direction_of(w(1.0, 0.0), &mut messages);
        let bullet = messages.last().map(|m| m.object_id).unwrap();
        messages.clear();

        run(&mut world, 0.1, &mut messages);
        assert_eq!(world.obstacle_count(), 0);
        assert_eq!(world.bullet_count(), 0);
        let deaths: Vec<u64> =
            messages.iter().filter(|m| !m.alive).map(|m| m.object_id).collect();
        assert_eq!(deaths, vec![stone, bullet]);
    }
}
