use std::fs;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::runtime::{Builder, Handle, Runtime};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tokio::task::JoinHandle;
use tracing::{debug, error};

use crate::backend::{DocumentSource, PdfDocument, RgbaFrame, default_source};
use crate::error::{AppError, AppResult};
use crate::viewer::{DocumentInfo, DocumentVariant, PaintJob};

enum RenderWorkerRequest {
    Open {
        request_id: u64,
        variant: DocumentVariant,
        path: PathBuf,
    },
    Paint(PaintJob),
    Export {
        variant: DocumentVariant,
        source: PathBuf,
        dest_dir: PathBuf,
    },
    Shutdown,
}

#[derive(Debug)]
pub struct OpenOutcome {
    pub request_id: u64,
    pub variant: DocumentVariant,
    pub result: AppResult<DocumentInfo>,
}

#[derive(Debug)]
pub struct PaintOutcome {
    pub job: PaintJob,
    pub result: AppResult<RgbaFrame>,
    pub elapsed: Duration,
}

/// Where the exported copy ended up.
#[derive(Debug)]
pub struct ExportOutcome {
    pub variant: DocumentVariant,
    pub result: AppResult<PathBuf>,
}

#[derive(Debug)]
pub enum WorkerEvent {
    Opened(OpenOutcome),
    Painted(PaintOutcome),
    Exported(ExportOutcome),
}

/// Owns the open document on a blocking thread and answers every request
/// with exactly one event, in request order.
pub(crate) struct RenderWorker {
    request_tx: UnboundedSender<RenderWorkerRequest>,
    result_rx: UnboundedReceiver<WorkerEvent>,
    _runtime: RenderWorkerRuntime,
    worker: Option<JoinHandle<()>>,
}

struct RenderWorkerRuntime {
    _owned: Option<Runtime>,
    handle: Handle,
}

impl RenderWorkerRuntime {
    fn new() -> Self {
        if let Ok(handle) = Handle::try_current() {
            return Self {
                _owned: None,
                handle,
            };
        }

        let runtime = Builder::new_multi_thread()
            .enable_all()
            .thread_name("dpv-render")
            .build()
            .expect("render runtime should initialize");
        let handle = runtime.handle().clone();
        Self {
            _owned: Some(runtime),
            handle,
        }
    }

    fn spawn_blocking<F>(&self, task: F) -> JoinHandle<()>
    where
        F: FnOnce() + Send + 'static,
    {
        self.handle.spawn_blocking(task)
    }
}

impl RenderWorker {
    pub(crate) fn spawn() -> Self {
        Self::spawn_with_source(default_source())
    }

    pub(crate) fn spawn_with_source(source: Arc<dyn DocumentSource>) -> Self {
        let (request_tx, request_rx) = unbounded_channel();
        let (result_tx, result_rx) = unbounded_channel();
        let runtime = RenderWorkerRuntime::new();
        let worker =
            runtime.spawn_blocking(move || render_worker_main(source, request_rx, result_tx));

        Self {
            request_tx,
            result_rx,
            _runtime: runtime,
            worker: Some(worker),
        }
    }

    pub(crate) fn open(
        &self,
        request_id: u64,
        variant: DocumentVariant,
        path: PathBuf,
    ) -> AppResult<()> {
        self.send(RenderWorkerRequest::Open {
            request_id,
            variant,
            path,
        })
    }

    pub(crate) fn paint(&self, job: PaintJob) -> AppResult<()> {
        self.send(RenderWorkerRequest::Paint(job))
    }

    pub(crate) fn export(
        &self,
        variant: DocumentVariant,
        source: PathBuf,
        dest_dir: PathBuf,
    ) -> AppResult<()> {
        self.send(RenderWorkerRequest::Export {
            variant,
            source,
            dest_dir,
        })
    }

    pub(crate) async fn recv(&mut self) -> Option<WorkerEvent> {
        self.result_rx.recv().await
    }

    fn send(&self, request: RenderWorkerRequest) -> AppResult<()> {
        self.request_tx
            .send(request)
            .map_err(|_| AppError::unsupported("render worker has stopped"))
    }

    fn shutdown(&mut self) {
        let _ = self.request_tx.send(RenderWorkerRequest::Shutdown);
        if let Some(worker) = self.worker.take() {
            worker.abort();
        }
    }
}

impl Drop for RenderWorker {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn render_worker_main(
    source: Arc<dyn DocumentSource>,
    mut request_rx: UnboundedReceiver<RenderWorkerRequest>,
    result_tx: UnboundedSender<WorkerEvent>,
) {
    let mut doc: Option<Box<dyn PdfDocument>> = None;

    while let Some(request) = request_rx.blocking_recv() {
        let event = match request {
            RenderWorkerRequest::Open {
                request_id,
                variant,
                path,
            } => {
                // The previous handle is dropped whether or not the new one opens.
                doc = None;
                let result = open_document(source.as_ref(), &path).map(|opened| {
                    let info = DocumentInfo {
                        doc_id: opened.doc_id(),
                        path: opened.path().to_path_buf(),
                        page_count: opened.page_count(),
                    };
                    doc = Some(opened);
                    info
                });
                WorkerEvent::Opened(OpenOutcome {
                    request_id,
                    variant,
                    result,
                })
            }
            RenderWorkerRequest::Paint(job) => {
                let started = Instant::now();
                let result = paint_job(doc.as_deref(), &job);
                WorkerEvent::Painted(PaintOutcome {
                    job,
                    result,
                    elapsed: started.elapsed(),
                })
            }
            RenderWorkerRequest::Export {
                variant,
                source,
                dest_dir,
            } => WorkerEvent::Exported(ExportOutcome {
                variant,
                result: export_document(&source, &dest_dir),
            }),
            RenderWorkerRequest::Shutdown => break,
        };

        if result_tx.send(event).is_err() {
            break;
        }
    }
    debug!("render worker stopped");
}

fn open_document(source: &dyn DocumentSource, path: &Path) -> AppResult<Box<dyn PdfDocument>> {
    match catch_unwind(AssertUnwindSafe(|| source.open(path))) {
        Ok(result) => result,
        Err(_) => {
            error!(path = %path.display(), "document source panicked while opening");
            Err(AppError::load(
                path,
                AppError::unsupported("renderer panicked while opening the document"),
            ))
        }
    }
}

/// Copies `source` into `dest_dir` under its own file name. Exporting a file
/// onto itself leaves it untouched.
fn export_document(source: &Path, dest_dir: &Path) -> AppResult<PathBuf> {
    let Some(file_name) = source.file_name() else {
        return Err(AppError::invalid_argument(format!(
            "cannot export {}: no file name",
            source.display()
        )));
    };
    fs::create_dir_all(dest_dir).map_err(|err| {
        AppError::io_with_context(
            err,
            format!("failed to create export directory {}", dest_dir.display()),
        )
    })?;

    let dest = dest_dir.join(file_name);
    if dest.exists() && fs::canonicalize(&dest)? == fs::canonicalize(source)? {
        return Ok(dest);
    }
    fs::copy(source, &dest).map_err(|err| {
        AppError::io_with_context(
            err,
            format!("failed to copy {} to {}", source.display(), dest.display()),
        )
    })?;
    Ok(dest)
}

fn paint_job(doc: Option<&dyn PdfDocument>, job: &PaintJob) -> AppResult<RgbaFrame> {
    let page_number = job.page();
    let Some(doc) = doc else {
        return Err(AppError::fetch(
            page_number,
            AppError::invalid_argument("no document is open"),
        ));
    };
    if doc.doc_id() != job.doc_id {
        return Err(AppError::fetch(
            page_number,
            AppError::invalid_argument("render job does not match the open document"),
        ));
    }

    match catch_unwind(AssertUnwindSafe(|| {
        let page = doc.page(page_number)?;
        let viewport = page.viewport(job.scale);
        page.paint(&viewport)
    })) {
        Ok(result) => result,
        Err(_) => {
            error!(page = page_number, "renderer panicked while painting");
            Err(AppError::paint(
                page_number,
                AppError::unsupported("renderer panicked"),
            ))
        }
    }
}
