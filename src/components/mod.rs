//! ECS components for level sprites.
//!
//! Every sprite carries a [`mapposition::MapPosition`], a
//! [`rigidbody::RigidBody`] and a [`sprite::Sprite`]. What the sprite *is*
//! comes from the extra components it carries.
//!
//! Submodules overview:
//! - [`animation`] – frame timeline shared between sprites, with a per-sprite cursor
//! - [`creature`] – health, life cycle and animation selection for anything alive
//! - [`mapposition`] – top-left corner of a sprite in map pixels
//! - [`player`] – ground contact and variable-height jump of the player
//! - [`powerup`] – collectible items and what they do
//! - [`rigidbody`] – velocity in pixels per millisecond
//! - [`sprite`] – the playing animation and the box it covers
//! - [`stuckto`] – non-owning relation that makes a sprite ride another
//! - [`weapon`] – marker for thrown projectiles

pub mod animation;
pub mod creature;
pub mod mapposition;
pub mod player;
pub mod powerup;
pub mod rigidbody;
pub mod sprite;
pub mod stuckto;
pub mod weapon;
