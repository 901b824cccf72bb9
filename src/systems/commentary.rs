//! Commentary worker thread and the systems that talk to it.
//!
//! - [`commentary_worker`] blocks on the request channel and answers each
//!   request with [`commentary_or_fallback`], so it never sends an error.
//! - [`request_commentary`] is called when a match ends.
//! - [`poll_commentary`] moves fresh replies into [`Commentary`] and drops
//!   replies for sessions that are already gone.

use bevy_ecs::prelude::*;
use crossbeam_channel::{Receiver, Sender};
use log::{debug, info, warn};

use crate::resources::commentary::{
    Commentary, CommentaryBridge, CommentaryReply, CommentaryRequest, Commentator,
    commentary_or_fallback,
};

/// Entry point of the commentary thread. Exits when the request channel
/// disconnects.
pub fn commentary_worker(
    rx_req: Receiver<CommentaryRequest>,
    tx_reply: Sender<CommentaryReply>,
    commentator: Box<dyn Commentator>,
) {
    debug!(
        "commentary thread starting (id={:?})",
        std::thread::current().id()
    );
    for req in rx_req.iter() {
        let text = commentary_or_fallback(commentator.as_ref(), &req.winner, &req.loser);
        if tx_reply
            .send(CommentaryReply {
                generation: req.generation,
                text,
            })
            .is_err()
        {
            break;
        }
    }
    debug!("commentary thread exiting");
}

/// Invalidate the current commentary and ask the worker for a new line.
pub fn request_commentary(
    commentary: &mut Commentary,
    bridge: &CommentaryBridge,
    winner: &str,
    loser: &str,
) {
    commentary.invalidate();
    let req = CommentaryRequest {
        generation: commentary.generation,
        winner: winner.to_string(),
        loser: loser.to_string(),
    };
    if bridge.tx_req.send(req).is_err() {
        warn!("commentary worker is gone; no commentary for this match");
    }
}

/// Drain replies; keep only the one matching the current generation.
pub fn poll_commentary(bridge: Res<CommentaryBridge>, mut commentary: ResMut<Commentary>) {
    for reply in bridge.rx_reply.try_iter() {
        if reply.generation == commentary.generation {
            info!("commentary: {}", reply.text);
            commentary.text = Some(reply.text);
        } else {
            debug!(
                "discarding stale commentary (generation {} != {})",
                reply.generation, commentary.generation
            );
        }
    }
}
