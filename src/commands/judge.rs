use rand::Rng;
use serenity::all::Message;
use serenity::prelude::*;

use crate::error::BotError;
use crate::utils::helpers::say;

const JUDGEMENTS: [&str; 10] = [
    "Cthulhu has judged, and found you wanting.",
    "Cthulhu has judged, and found you unworthy even of madness.",
    "Cthulhu has judged, and recoils in disgust.",
    "Cthulhu has judged, and yawns.",
    "Cthulhu has judged, and is indifferent.",
    "Cthulhu has judged, and has already forgotten you.",
    "Cthulhu has judged, and finds you mildly amusing.",
    "Cthulhu has judged, and deems you a fitting snack.",
    "Cthulhu has judged, and is intrigued.",
    "Cthulhu has judged, and found you exceptional.",
];

pub async fn execute(ctx: &Context, msg: &Message) -> Result<(), BotError> {
    let (_, judgement) = judge(&mut rand::thread_rng());

    say(ctx, msg, judgement).await?;
    Ok(())
}

/// Draws a value in `1..=10` and the judgement it maps to.
pub fn judge(rng: &mut impl Rng) -> (u8, &'static str) {
    let value: u8 = rng.gen_range(1..=10);
    (value, JUDGEMENTS[usize::from(value - 1)])
}
