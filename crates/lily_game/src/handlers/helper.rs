//! Friendly characters that talk to the player.

use lily_core::animation::Flip;
use lily_core::input::Key;
use lily_core::time::Timer;
use rand_pcg::Pcg32;

use super::{Behavior, HandlerContext};
use crate::collision::nearest_cell;
use crate::entity::{Entity, EntityData, HelperData};
use crate::error::HandlerError;

/// Cooldown between two conversations, in milliseconds.
const INTERACTION_DELAY: u64 = 1000;

#[derive(Debug)]
pub struct Helper {
    message: &'static str,
}

impl Helper {
    pub const fn new(message: &'static str) -> Self {
        Self { message }
    }

    pub fn message(&self) -> &'static str {
        self.message
    }
}

pub static GUIDE: Helper = Helper::new(
    "Hey there! Just thought I'd help you figure out how things work around \
     here. Press Z to jump and SPACE to sprint. Go through the door (press C) \
     to continue on to the next level! Good luck!",
);

pub static CAT: Helper = Helper::new(
    "Hi there! I am Lily. The spiders ahead are scary! If they hit you, they \
     can damage you. Jump on top of the spiders to squish them. You can use X \
     instead of Z to short jump.",
);

pub static LADDER: Helper = Helper::new(
    "Comparing Beethoven to Rachmaninoff is like comparing a dragon to a \
     dragonfly. By the way, you can climb the ladders ahead using the Up and \
     Down arrow keys.",
);

pub static GHOST: Helper = Helper::new(
    "Be careful of those spooky ghosts. They throw scary blue flaming orbs \
     that can damage you. Jump on top of the ghosts to squish them, but you \
     can't squish the orbs.",
);

pub static GUIDE_FAREWELL: Helper = Helper::new("This is the last level. Good luck!");

pub static CAT_FAREWELL: Helper = Helper::new(
    "Thank you for playing lilypond, a completely free and open source game.",
);

pub static LADDER_FAREWELL: Helper = Helper::new(
    "Let us work for a better world together, a world free of oppression.",
);

pub static GHOST_FAREWELL: Helper = Helper::new(
    "Let us continue working for the world's children. As James Baldwin said, \
     \"The children are always ours, every single one of them, all over the \
     globe\". Good bye!",
);

impl Behavior for Helper {
    fn init(&self, entity: &mut Entity, _rng: &mut Pcg32) -> Result<(), HandlerError> {
        entity.animation.flip = Flip::Horizontal;
        entity.data = EntityData::Helper(HelperData {
            interaction_timer: Timer::new(INTERACTION_DELAY),
        });
        Ok(())
    }

    /// Turn towards a player on the same row and talk when they are close.
    fn frame(&self, entity: &mut Entity, ctx: &mut HandlerContext<'_>) -> Result<(), HandlerError> {
        entity.helper_mut()?.interaction_timer.tick(ctx.dt_ms);

        let (player_row, player_col) = nearest_cell(ctx.player_entity);
        let (row, col) = nearest_cell(entity);
        if player_row != row {
            return Ok(());
        }

        entity.animation.flip = if player_col <= col {
            Flip::Horizontal
        } else {
            Flip::None
        };

        if (player_col - col).abs() <= 1 {
            self.hit(entity, ctx)?;
        }
        Ok(())
    }

    /// The player must face the helper, hold Interact, and stand still on
    /// solid ground.
    fn hit(&self, entity: &mut Entity, ctx: &mut HandlerContext<'_>) -> Result<(), HandlerError> {
        let facing_away = ctx.player_entity.animation.flip == entity.animation.flip;
        let player = &*ctx.player;
        let timer = &mut entity.helper_mut()?.interaction_timer;

        if facing_away
            || !ctx.input.is_held(Key::Interact)
            || !timer.done()
            || ctx.player_entity.vx != 0.0
            || player.air
            || player.ladder
        {
            return Ok(());
        }

        timer.reset();
        ctx.message.set(self.message, true, ctx.audio);
        Ok(())
    }
}
