use crate::common::*;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;

const TEXT_FORMAT_CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";
const REQUEST_BUFFER_SIZE: usize = 8192;
const REQUEST_READ_TIMEOUT_SEC: u64 = 5;
const ACCEPT_ERROR_BACKOFF_MS: u64 = 100;

#[doc = "registry 의 현재 값을 Prometheus text format 으로 변환해주는 함수"]
pub fn render_registry(registry: &Registry) -> Result<String, anyhow::Error> {
    let encoder: TextEncoder = TextEncoder::new();
    let mut buffer: Vec<u8> = Vec::new();

    encoder
        .encode(&registry.gather(), &mut buffer)
        .map_err(|e| anyhow!("[render_registry] {:?}", e))?;

    String::from_utf8(buffer).map_err(|e| anyhow!("[render_registry] {:?}", e))
}

/// Minimal HTTP endpoint serving `GET /metrics` and `GET /healthz` from a registry.
#[derive(Debug)]
pub struct MetricsController {
    local_addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
    join: tokio::task::JoinHandle<anyhow::Result<()>>,
}

impl MetricsController {
    #[doc = "Function that starts serving the registry on `bind_addr`."]
    /// # Arguments
    /// * `bind_addr` - listen 주소. 포트 0 이면 OS 가 빈 포트를 골라준다.
    /// * `registry`  - 노출할 metrics registry
    ///
    /// # Returns
    /// * Result<Self, anyhow::Error>
    pub async fn bind(bind_addr: SocketAddr, registry: Arc<Registry>) -> anyhow::Result<Self> {
        Self::serve(
            bind_addr,
            registry,
            Duration::from_secs(REQUEST_READ_TIMEOUT_SEC),
        )
        .await
    }

    async fn serve(
        bind_addr: SocketAddr,
        registry: Arc<Registry>,
        read_timeout: Duration,
    ) -> anyhow::Result<Self> {
        let listener: TcpListener = TcpListener::bind(bind_addr)
            .await
            .map_err(|e| anyhow!("[MetricsController::bind] {}: {:?}", bind_addr, e))?;
        let local_addr: SocketAddr = listener.local_addr()?;
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();

        info!("[MetricsController] serving metrics on http://{}/metrics", local_addr);

        let join: tokio::task::JoinHandle<anyhow::Result<()>> = tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => {
                        break;
                    }
                    accept = listener.accept() => {
                        if let Some(pause) = Self::on_accept(accept, &registry, read_timeout) {
                            tokio::time::sleep(pause).await;
                        }
                    }
                }
            }
            Ok(())
        });

        Ok(Self {
            local_addr,
            shutdown_tx: Some(shutdown_tx),
            join,
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    #[doc = "Function that stops the listener and waits for it to finish."]
    pub async fn shutdown(mut self) -> anyhow::Result<()> {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }

        self.join
            .await
            .map_err(|e| anyhow!("[MetricsController::shutdown] join failed: {:?}", e))?
    }

    #[doc = "accept 결과 처리 - 연결은 별도 task 로 넘기고, 실패해도 listener 는 계속 살아있다."]
    /// # Returns
    /// * Option<Duration> - 다음 accept 전에 쉬어야 하는 시간
    fn on_accept(
        accept: std::io::Result<(TcpStream, SocketAddr)>,
        registry: &Arc<Registry>,
        read_timeout: Duration,
    ) -> Option<Duration> {
        match accept {
            Ok((mut socket, peer)) => {
                let registry: Arc<Registry> = Arc::clone(registry);
                tokio::spawn(async move {
                    if let Err(e) =
                        Self::handle_connection(&mut socket, &registry, read_timeout).await
                    {
                        warn!("[MetricsController] request from {} failed: {:?}", peer, e);
                    }
                });
                None
            }
            Err(e) => {
                let pause: Option<Duration> = Self::accept_backoff(&e);
                warn!(
                    "[MetricsController] accept failed, retrying in {:?}: {:?}",
                    pause.unwrap_or(Duration::ZERO),
                    e
                );
                pause
            }
        }
    }

    /* 연결 하나만 망가진 경우는 바로 재시도, fd 고갈 같은 자원 부족은 잠깐 쉰다. */
    fn accept_backoff(err: &std::io::Error) -> Option<Duration> {
        match err.kind() {
            std::io::ErrorKind::ConnectionAborted
            | std::io::ErrorKind::ConnectionReset
            | std::io::ErrorKind::Interrupted
            | std::io::ErrorKind::WouldBlock => None,
            _ => Some(Duration::from_millis(ACCEPT_ERROR_BACKOFF_MS)),
        }
    }

    #[doc = "요청 라인이 다 들어올 때까지 읽는다 - 버퍼가 차거나 상대가 닫으면 거기까지만."]
    async fn read_request_head(socket: &mut TcpStream, buf: &mut [u8]) -> std::io::Result<usize> {
        let mut filled: usize = 0;

        while filled < buf.len() {
            let n: usize = socket.read(&mut buf[filled..]).await?;
            if n == 0 {
                break;
            }
            filled += n;

            if buf[..filled].windows(2).any(|w| w == b"\r\n") {
                break;
            }
        }

        Ok(filled)
    }

    async fn handle_connection(
        socket: &mut TcpStream,
        registry: &Registry,
        read_timeout: Duration,
    ) -> anyhow::Result<()> {
        let mut buf = [0u8; REQUEST_BUFFER_SIZE];
        let n: usize = tokio::time::timeout(read_timeout, Self::read_request_head(socket, &mut buf))
            .await
            .map_err(|_| {
                anyhow!(
                    "[MetricsController::handle_connection] no request line within {:?}",
                    read_timeout
                )
            })??;
        if n == 0 {
            return Ok(());
        }

        let request: std::borrow::Cow<'_, str> = String::from_utf8_lossy(&buf[..n]);
        let mut request_line = request.lines().next().unwrap_or("").split_whitespace();
        let method: &str = request_line.next().unwrap_or("");
        let path: &str = request_line.next().unwrap_or("");

        match (method, path) {
            ("GET", "/metrics") => {
                let body: String = render_registry(registry)?;
                Self::write_response(socket, "200 OK", TEXT_FORMAT_CONTENT_TYPE, &body).await
            }
            ("GET", "/healthz") => {
                Self::write_response(socket, "200 OK", "text/plain; charset=utf-8", "ok\n").await
            }
            _ => {
                Self::write_response(socket, "404 Not Found", "text/plain; charset=utf-8", "not found\n")
                    .await
            }
        }
    }

    async fn write_response(
        socket: &mut TcpStream,
        status: &str,
        content_type: &str,
        body: &str,
    ) -> anyhow::Result<()> {
        let header: String = format!(
            "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            status,
            content_type,
            body.len()
        );
        socket.write_all(header.as_bytes()).await?;
        socket.write_all(body.as_bytes()).await?;
        socket.shutdown().await?;
        Ok(())
    }
}
