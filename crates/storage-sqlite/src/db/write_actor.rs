//! Single-writer actor for serialized SQLite writes.
//!
//! SQLite allows one writer at a time; funnelling every mutation through one
//! dedicated connection avoids `SQLITE_BUSY` contention under concurrent
//! requests. Each job runs inside an immediate transaction.

use diesel::SqliteConnection;
use std::any::Any;
use tokio::sync::{mpsc, oneshot};

use super::DbPool;
use crate::errors::StorageError;
use pricebook_core::errors::Result;

/// A write job: a closure run on the actor's dedicated connection. Return
/// values are type-erased through `Box<dyn Any>` so one channel carries jobs
/// of any result type.
type Job<T> = Box<dyn FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static>;

type ErasedJob = Job<Box<dyn Any + Send + 'static>>;
type Reply = oneshot::Sender<Result<Box<dyn Any + Send + 'static>>>;

/// Cloneable handle for submitting jobs to the writer actor.
#[derive(Clone)]
pub struct WriteHandle {
    tx: mpsc::Sender<(ErasedJob, Reply)>,
}

impl WriteHandle {
    /// Executes `job` on the writer's connection and awaits its result.
    pub async fn exec<F, T>(&self, job: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static,
        T: Send + 'static + Any,
    {
        let (ret_tx, ret_rx) = oneshot::channel();

        self.tx
            .send((
                Box::new(move |c| job(c).map(|v| Box::new(v) as Box<dyn Any + Send>)),
                ret_tx,
            ))
            .await
            .expect("writer actor channel closed, actor has stopped");

        ret_rx
            .await
            .expect("writer actor dropped the reply sender without a result")
            .map(|boxed| {
                *boxed
                    .downcast::<T>()
                    .unwrap_or_else(|_| panic!("writer actor result had unexpected type"))
            })
    }
}

/// Spawns the background writer task. It holds one pooled connection for its
/// whole lifetime and processes jobs strictly in submission order.
pub fn spawn_writer(pool: DbPool) -> WriteHandle {
    let (tx, mut rx) = mpsc::channel::<(ErasedJob, Reply)>(1024);

    tokio::spawn(async move {
        let mut conn = pool
            .get()
            .expect("no connection available for the writer actor");

        while let Some((job, reply_tx)) = rx.recv().await {
            // Jobs run under StorageError so Diesel errors convert with `?`,
            // then map back to the core error at the boundary.
            let result = conn
                .immediate_transaction::<_, StorageError, _>(|c| {
                    job(c).map_err(StorageError::from)
                })
                .map_err(|e: StorageError| e.into());

            // The receiver may have been dropped by a cancelled caller.
            let _ = reply_tx.send(result);
        }
    });

    WriteHandle { tx }
}
