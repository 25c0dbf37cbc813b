use anyhow::Result;
use serde::{Deserialize, Serialize};
use sqlx::{Pool, Postgres};
use tokio::io::AsyncWriteExt;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot::Receiver;
use tracing::info;

use crate::constant;
use crate::product::repo::ProductRepository;
use crate::req::Request;
use crate::route::{PRODUCTS_PATH, Route};
use crate::svc::{Envelope, Service};
use crate::utils::ser_to_str;
use std::sync::Arc;

#[derive(Serialize, Deserialize, Debug)]
struct ApiInfo {
    message: String,
    version: String,
    database: String,
    endpoints: Endpoints,
}

#[derive(Serialize, Deserialize, Debug)]
struct Endpoints {
    products: String,
}

impl ApiInfo {
    fn new() -> Self {
        Self {
            message: "🎉 API Natal Tech está funcionando!".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            database: "PostgreSQL".to_string(),
            endpoints: Endpoints {
                products: PRODUCTS_PATH.to_string(),
            },
        }
    }
}

pub struct Server {
    svc: Arc<Service<ProductRepository>>,
}

impl Server {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            svc: Arc::new(Service::new(ProductRepository::new(pool))),
        }
    }

    pub async fn start(self, port: u16, mut shutdown_rx: Receiver<()>) -> Result<()> {
        let listener = TcpListener::bind(("0.0.0.0", port)).await?;
        println!("🚀 Servidor rodando na porta {}", port);
        println!("📍 http://localhost:{}", port);

        loop {
            tokio::select! {
                conn = listener.accept() => {
                    let (stream, _) = conn?;
                    let svc = Arc::clone(&self.svc);
                    tokio::spawn(async move {
                        crate::logging::thread_logging(crate::constant::LOGGING_INCOMING_REQUEST);
                        if let Err(e) = Self::handle_client(stream, &svc).await {
                            eprintln!("Connection error: {}", e);
                        }
                });
                },
                _ = &mut shutdown_rx => {
                    println!("shutting down ...");
                    break;
                }
            }
        }
        Ok(())
    }

    async fn handle_client(
        mut stream: TcpStream,
        svc: &Arc<Service<ProductRepository>>,
    ) -> Result<()> {
        let request = match Request::new(&mut stream).await {
            Ok(request) => request,
            Err(e) => {
                info!("error {}", e);
                let body =
                    ser_to_str(&Envelope::fail_error("Requisição inválida", e.to_string()))?;
                stream
                    .write_all(format!("{}{}", constant::BAD_REQUEST, body).as_bytes())
                    .await?;
                return Ok(());
            }
        };
        info!("{:?} {}", request.method, request.path);
        let (_, mut writer) = stream.split();

        match Route::resolve(&request.method, &request.path) {
            Route::Index => {
                let body = ser_to_str(&ApiInfo::new())?;
                writer
                    .write_all(format!("{}{}", constant::OK_RESPONSE, body).as_bytes())
                    .await?;
            }
            Route::ListProducts => svc.get_products(&mut writer).await?,
            Route::GetProduct(id) => svc.get_product_by_id(&id, &mut writer).await?,
            Route::CreateProduct => {
                svc.create_product(request.body.as_deref(), &mut writer)
                    .await?
            }
            Route::UpdateProduct(id) => {
                svc.update_product(&id, request.body.as_deref(), &mut writer)
                    .await?
            }
            Route::DeleteProduct(id) => svc.delete_product(&id, &mut writer).await?,
            Route::Preflight => {
                writer.write_all(constant::NO_CONTENT.as_bytes()).await?;
            }
            Route::NotFound => {
                let body = ser_to_str(&Envelope::fail("Rota não encontrada"))?;
                writer
                    .write_all(format!("{}{}", constant::NOT_FOUND, body).as_bytes())
                    .await?;
            }
        };
        Ok(())
    }
}
