//! Collectable items: coins and extra lives.

use rand_pcg::Pcg32;

use super::{Behavior, HandlerContext};
use crate::archetype::ArchetypeId;
use crate::entity::{Entity, EntityData, ItemData};
use crate::error::HandlerError;
use crate::sound::{Channel, Sound};

/// How long a collected item takes to fade out, in milliseconds.
const DISAPPEAR_DELAY: f64 = 150.0;

#[derive(Debug)]
pub struct Item;

pub static ITEM: Item = Item;

impl Behavior for Item {
    fn init(&self, entity: &mut Entity, _rng: &mut Pcg32) -> Result<(), HandlerError> {
        entity.data = EntityData::Item(ItemData { collected: false });
        Ok(())
    }

    fn frame(&self, entity: &mut Entity, ctx: &mut HandlerContext<'_>) -> Result<(), HandlerError> {
        let collected = entity.item_mut()?.collected;
        if !collected || entity.removed {
            return Ok(());
        }

        let fade = 255.0 / DISAPPEAR_DELAY * ctx.dt_ms as f64;
        entity.animation.alpha = (entity.animation.alpha as f64 - fade) as i64;
        if entity.animation.alpha < 0 {
            entity.animation.alpha = 0;
            entity.removed = true;
        }
        Ok(())
    }

    fn hit(&self, entity: &mut Entity, ctx: &mut HandlerContext<'_>) -> Result<(), HandlerError> {
        let item = entity.item_mut()?;
        if item.collected {
            return Ok(());
        }
        item.collected = true;

        match entity.archetype {
            ArchetypeId::Coin => {
                ctx.player.coins += 1;
                ctx.audio.play(Sound::Coin, Channel::Sprite);
            }
            ArchetypeId::ExtraLife => {
                ctx.player.lives += 1;
                ctx.audio.play(Sound::ExtraLife, Channel::Sprite);
            }
            archetype => {
                log::error!("{archetype:?} is bound to the item behavior");
                return Err(HandlerError::NotAnItem { archetype });
            }
        }
        Ok(())
    }
}
