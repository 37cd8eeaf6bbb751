//! Live stream creation and browsing.

use neighborhood_common::{Field, FieldError, InputKind, TimeFormatter};
use neighborhood_database::{CreateStreamRequest as NewStream, Stream, StreamRepository};
use sqlx::SqlitePool;
use tracing::info;

use crate::types::{CreateStreamRequest, StreamError, StreamResult, StreamView};

pub const STREAMS_PER_PAGE: u32 = 10;

const MIN_TEXT_LENGTH: usize = 5;

fn name_field() -> Field {
    Field::new("name", InputKind::Text)
        .required("*제목을 입력해주세요.")
        .min_length(MIN_TEXT_LENGTH, "*제목을 5글자 이상 입력해주세요.")
}

fn price_field() -> Field {
    Field::new("price", InputKind::Price).required("*가격을 입력해주세요.")
}

fn description_field() -> Field {
    Field::new("description", InputKind::Text)
        .required("*설명을 입력해주세요.")
        .min_length(MIN_TEXT_LENGTH, "*설명을 5글자 이상 입력해주세요.")
}

/// Runs the rules of `field` and hands back the trimmed value.
fn checked_text(field: Field, value: Option<String>) -> Result<String, FieldError> {
    field.check(value.as_deref())?;
    Ok(value.map(|v| v.trim().to_string()).unwrap_or_default())
}

#[derive(Clone)]
pub struct StreamService {
    streams: StreamRepository,
    formatter: TimeFormatter,
}

impl StreamService {
    pub fn new(pool: SqlitePool, formatter: TimeFormatter) -> Self {
        Self {
            streams: StreamRepository::new(pool),
            formatter,
        }
    }

    pub async fn create_stream(
        &self,
        user_id: i64,
        request: CreateStreamRequest,
    ) -> StreamResult<StreamView> {
        let name = checked_text(name_field(), request.name)?;
        price_field().check_number(request.price)?;
        let price = request.price.unwrap_or_default();
        let description = checked_text(description_field(), request.description)?;

        let stream = self
            .streams
            .create(
                user_id,
                &NewStream {
                    name,
                    price,
                    description,
                },
            )
            .await?;
        info!(stream_id = stream.id, user_id, "stream created");

        Ok(self.view(stream))
    }

    pub async fn get_stream(&self, stream_id: i64) -> StreamResult<StreamView> {
        let stream = self
            .streams
            .find_by_id(stream_id)
            .await?
            .ok_or(StreamError::StreamNotFound)?;
        Ok(self.view(stream))
    }

    /// Streams on `page` (starting at 1), newest first.
    pub async fn list_streams(&self, page: u32) -> StreamResult<Vec<StreamView>> {
        let streams = self.streams.list_page(page.max(1), STREAMS_PER_PAGE).await?;
        Ok(streams.into_iter().map(|s| self.view(s)).collect())
    }

    fn view(&self, stream: Stream) -> StreamView {
        StreamView {
            id: stream.id,
            user_id: stream.user_id,
            created_label: self.formatter.reservation_time(stream.created_at),
            name: stream.name,
            price: stream.price,
            description: stream.description,
            created: stream.created_at,
        }
    }
}
