/*!
 * Queue Demo - Main Entry Point
 *
 * Runs a set of producer threads and consumer threads over one queue:
 * - Producers hand off numbered messages, the last one out closes the queue
 * - Consumers drain until the queue is done
 * - Final statistics are printed as JSON
 */

use miette::{miette, IntoDiagnostic, Result, WrapErr};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use tracing::{info, warn};

use thread_queue::{init_tracing, QueueConfig, SharedQueue, ThreadQueue};

/// Demo settings, read from QUEUE_DEMO_* environment variables
#[derive(Debug, Clone)]
struct DemoConfig {
    capacity: usize,
    producers: usize,
    consumers: usize,
    items_per_producer: usize,
}

impl DemoConfig {
    fn from_env() -> Result<Self> {
        Ok(Self {
            capacity: env_or("QUEUE_DEMO_CAPACITY", 16)?,
            producers: env_or("QUEUE_DEMO_PRODUCERS", 4)?.max(1),
            consumers: env_or("QUEUE_DEMO_CONSUMERS", 2)?.max(1),
            items_per_producer: env_or("QUEUE_DEMO_ITEMS", 1000)?,
        })
    }
}

fn env_or(key: &str, default: usize) -> Result<usize> {
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| miette!("{key}={raw:?} is not a valid count: {e}")),
        Err(_) => Ok(default),
    }
}

/// Message handed from producers to consumers
#[derive(Debug)]
struct Message {
    producer: usize,
    seq: usize,
    payload: Vec<u8>,
}

fn main() -> Result<()> {
    init_tracing();

    let config = DemoConfig::from_env()?;
    info!(?config, "queue demo starting");

    let queue: SharedQueue<Message> =
        ThreadQueue::shared(QueueConfig::bounded(config.capacity).with_name("demo"));
    let live_producers = Arc::new(AtomicUsize::new(config.producers));

    let producers: Vec<_> = (0..config.producers)
        .map(|producer| {
            let queue = queue.clone();
            let live = live_producers.clone();
            let items = config.items_per_producer;
            thread::Builder::new()
                .name(format!("producer-{producer}"))
                .spawn(move || {
                    for seq in 0..items {
                        let message = Message {
                            producer,
                            seq,
                            payload: seq.to_le_bytes().to_vec(),
                        };
                        if queue.put(message).is_err() {
                            warn!(producer, seq, "queue closed early, producer stopping");
                            break;
                        }
                    }
                    if live.fetch_sub(1, Ordering::AcqRel) == 1 {
                        queue.close();
                    }
                })
                .into_diagnostic()
                .wrap_err("failed to spawn producer")
        })
        .collect::<Result<_>>()?;

    let consumers: Vec<_> = (0..config.consumers)
        .map(|consumer| {
            let queue = queue.clone();
            thread::Builder::new()
                .name(format!("consumer-{consumer}"))
                .spawn(move || {
                    let mut received = 0usize;
                    let mut bytes = 0usize;
                    for message in queue.iter() {
                        received += 1;
                        bytes += message.payload.len();
                        if message.seq == 0 {
                            info!(consumer, from = message.producer, "first message from producer");
                        }
                    }
                    (received, bytes)
                })
                .into_diagnostic()
                .wrap_err("failed to spawn consumer")
        })
        .collect::<Result<_>>()?;

    for handle in producers {
        handle
            .join()
            .map_err(|_| miette!("producer thread panicked"))?;
    }

    let mut total = 0usize;
    for (consumer, handle) in consumers.into_iter().enumerate() {
        let (received, bytes) = handle
            .join()
            .map_err(|_| miette!("consumer thread panicked"))?;
        info!(consumer, received, bytes, "consumer finished");
        total += received;
    }

    let stats = queue.stats();
    let expected = config.producers * config.items_per_producer;
    if total != expected || !stats.done {
        return Err(miette!(
            "delivered {total} of {expected} messages (done: {})",
            stats.done
        ));
    }

    println!(
        "{}",
        serde_json::to_string_pretty(&stats).into_diagnostic()?
    );
    info!(total, "queue demo finished");
    Ok(())
}
