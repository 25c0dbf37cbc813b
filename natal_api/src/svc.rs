use anyhow::Result;
use product_validate::product::{ProductForm, parse_id, validate_product};
use serde::{Deserialize, Serialize};
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::info;

use crate::constant::{BAD_REQUEST, CREATED, INTERNAL_ERROR, NOT_FOUND, OK_RESPONSE};
use crate::error::StoreError;
use crate::product::model::{NewProduct, ProductChanges, ProductWithSavings};
use crate::product::repo::ProductStore;
use crate::utils::{des_from_str, ser_to_str};

#[derive(Serialize, Deserialize, Debug)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> Envelope<T> {
    pub fn item(data: T) -> Self {
        Self {
            success: true,
            message: None,
            count: None,
            data: Some(data),
            errors: None,
            error: None,
        }
    }

    pub fn with_message(message: &str, data: T) -> Self {
        Self {
            message: Some(message.to_string()),
            ..Self::item(data)
        }
    }
}

impl<T> Envelope<Vec<T>> {
    pub fn list(data: Vec<T>) -> Self {
        Self {
            count: Some(data.len()),
            ..Self::item(data)
        }
    }
}

impl Envelope<()> {
    pub fn fail(message: &str) -> Self {
        Self {
            success: false,
            message: Some(message.to_string()),
            count: None,
            data: None,
            errors: None,
            error: None,
        }
    }

    pub fn fail_errors(message: &str, errors: Vec<String>) -> Self {
        Self {
            errors: Some(errors),
            ..Self::fail(message)
        }
    }

    pub fn fail_error(message: &str, error: String) -> Self {
        Self {
            error: Some(error),
            ..Self::fail(message)
        }
    }
}

#[derive(Clone)]
pub struct Service<S> {
    store: S,
}

impl<S: ProductStore> Service<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn get_products<W: AsyncWrite + Unpin>(&self, writer: &mut W) -> Result<()> {
        match self.store.list().await {
            Ok(products) => {
                let data: Vec<ProductWithSavings> = products.into_iter().map(Into::into).collect();
                let body = ser_to_str(&Envelope::list(data))?;
                write_response(writer, OK_RESPONSE, &body).await
            }
            Err(e) => {
                info!("error {:?}", e);
                let body =
                    ser_to_str(&Envelope::fail_error("Erro ao buscar produtos", e.detail()))?;
                write_response(writer, INTERNAL_ERROR, &body).await
            }
        }
    }

    pub async fn get_product_by_id<W: AsyncWrite + Unpin>(
        &self,
        id: &str,
        writer: &mut W,
    ) -> Result<()> {
        let Some(product_id) = parse_id(id) else {
            let body = ser_to_str(&Envelope::fail("ID inválido"))?;
            return write_response(writer, BAD_REQUEST, &body).await;
        };
        match self.store.get(product_id).await {
            Ok(product) => {
                let body = ser_to_str(&Envelope::item(ProductWithSavings::from(product)))?;
                write_response(writer, OK_RESPONSE, &body).await
            }
            Err(StoreError::NotFound) => {
                let body = ser_to_str(&Envelope::fail("Produto não encontrado"))?;
                write_response(writer, NOT_FOUND, &body).await
            }
            Err(e) => {
                info!("error {:?}", e);
                let body = ser_to_str(&Envelope::fail_error("Erro ao buscar produto", e.detail()))?;
                write_response(writer, INTERNAL_ERROR, &body).await
            }
        }
    }

    pub async fn create_product<W: AsyncWrite + Unpin>(
        &self,
        payload: Option<&str>,
        writer: &mut W,
    ) -> Result<()> {
        let form = match parse_form(payload) {
            Ok(form) => form,
            Err(e) => {
                let body = ser_to_str(&Envelope::fail_error("Dados inválidos", e.to_string()))?;
                return write_response(writer, BAD_REQUEST, &body).await;
            }
        };
        let validation = validate_product(&form);
        if !validation.is_valid {
            let body = ser_to_str(&Envelope::fail_errors("Dados inválidos", validation.errors))?;
            return write_response(writer, BAD_REQUEST, &body).await;
        }
        // A form that passed validation has every field.
        let Some(new_product) = NewProduct::from_form(form) else {
            let body = ser_to_str(&Envelope::fail("Dados inválidos"))?;
            return write_response(writer, BAD_REQUEST, &body).await;
        };
        match self.store.insert(&new_product).await {
            Ok(product) => {
                let body =
                    ser_to_str(&Envelope::with_message("Produto criado com sucesso!", product))?;
                write_response(writer, CREATED, &body).await
            }
            Err(e) => {
                info!("error {:?}", e);
                // Store failures on create report as client errors.
                let body = ser_to_str(&Envelope::fail_error("Erro ao criar produto", e.detail()))?;
                write_response(writer, BAD_REQUEST, &body).await
            }
        }
    }

    pub async fn update_product<W: AsyncWrite + Unpin>(
        &self,
        id: &str,
        payload: Option<&str>,
        writer: &mut W,
    ) -> Result<()> {
        let Some(product_id) = parse_id(id) else {
            let body = ser_to_str(&Envelope::fail("ID inválido"))?;
            return write_response(writer, BAD_REQUEST, &body).await;
        };
        let form = match parse_form(payload) {
            Ok(form) => form,
            Err(e) => {
                let body = ser_to_str(&Envelope::fail_error("Dados inválidos", e.to_string()))?;
                return write_response(writer, BAD_REQUEST, &body).await;
            }
        };
        // The full payload is required even though the update set is sparse.
        let validation = validate_product(&form);
        if !validation.is_valid {
            let body = ser_to_str(&Envelope::fail_errors("Dados inválidos", validation.errors))?;
            return write_response(writer, BAD_REQUEST, &body).await;
        }
        let changes = ProductChanges::from_form(form);
        match self.store.update(product_id, &changes).await {
            Ok(product) => {
                let body = ser_to_str(&Envelope::with_message(
                    "Produto atualizado com sucesso!",
                    product,
                ))?;
                write_response(writer, OK_RESPONSE, &body).await
            }
            Err(StoreError::NotFound) => {
                let body = ser_to_str(&Envelope::fail("Produto não encontrado"))?;
                write_response(writer, NOT_FOUND, &body).await
            }
            Err(e) => {
                info!("error {:?}", e);
                // Same client-error mapping as create.
                let body =
                    ser_to_str(&Envelope::fail_error("Erro ao atualizar produto", e.detail()))?;
                write_response(writer, BAD_REQUEST, &body).await
            }
        }
    }

    pub async fn delete_product<W: AsyncWrite + Unpin>(
        &self,
        id: &str,
        writer: &mut W,
    ) -> Result<()> {
        let Some(product_id) = parse_id(id) else {
            let body = ser_to_str(&Envelope::fail("ID inválido"))?;
            return write_response(writer, BAD_REQUEST, &body).await;
        };
        match self.store.delete(product_id).await {
            Ok(product) => {
                let body = ser_to_str(&Envelope::with_message(
                    "Produto deletado com sucesso!",
                    product,
                ))?;
                write_response(writer, OK_RESPONSE, &body).await
            }
            Err(StoreError::NotFound) => {
                let body = ser_to_str(&Envelope::fail("Produto não encontrado"))?;
                write_response(writer, NOT_FOUND, &body).await
            }
            Err(e) => {
                info!("error {:?}", e);
                let body =
                    ser_to_str(&Envelope::fail_error("Erro ao deletar produto", e.detail()))?;
                write_response(writer, INTERNAL_ERROR, &body).await
            }
        }
    }
}

// No body submitted means an empty form, so every required field reports.
fn parse_form(payload: Option<&str>) -> Result<ProductForm, serde_json::Error> {
    match payload {
        Some(raw) if !raw.trim().is_empty() => des_from_str::<ProductForm>(raw),
        _ => Ok(ProductForm::default()),
    }
}

async fn write_response<W: AsyncWrite + Unpin>(
    writer: &mut W,
    status: &str,
    body: &str,
) -> Result<()> {
    writer
        .write_all(format!("{}{}", status, body).as_bytes())
        .await?;
    Ok(())
}
