use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::config::DrawConfig;
use crate::engine::{
    Clock, Debouncer, SystemClock, ValidateOptions, WinnerHistory, count_matches, draw,
    filter_entries,
};
use crate::error::{AppError, AppResult};
use crate::external::TabularReader;
use crate::models::{
    DrawResponse, Entry, EntryListQuery, EntryListResponse, HistoryResponse, PaginatedResponse,
    PaginationParams, SearchResponse, SessionResponse, UploadResponse, WinnerRecord,
};
use crate::services::IngestionService;

/// 单个操作员的抽奖会话（全部状态仅在内存中）
struct DrawSession {
    id: Uuid,
    entries: Vec<Entry>,
    source_file_name: Option<String>,
    search: Debouncer,
    history: WinnerHistory,
    latest_winner: Option<WinnerRecord>,
    /// 上传序号，用于丢弃过期的解码结果
    upload_seq: u64,
    created_at: DateTime<Utc>,
    last_active_at: DateTime<Utc>,
}

impl DrawSession {
    fn new(config: &DrawConfig, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            entries: Vec::new(),
            source_file_name: None,
            search: Debouncer::new(Duration::milliseconds(config.search_debounce_ms)),
            history: WinnerHistory::new(config.max_history),
            latest_winner: None,
            upload_seq: 0,
            created_at: now,
            last_active_at: now,
        }
    }

    /// 任何针对会话的操作都视为活跃
    fn touch(&mut self, now: DateTime<Utc>) {
        self.last_active_at = now;
    }

    fn filtered(&mut self, now: DateTime<Utc>) -> Vec<Entry> {
        let query = self.search.committed(now).to_string();
        filter_entries(&self.entries, &query)
    }

    fn summary(&mut self, now: DateTime<Utc>) -> SessionResponse {
        let filtered_entries = count_matches(&self.entries, self.search.committed(now));
        SessionResponse {
            session_id: self.id,
            source_file_name: self.source_file_name.clone(),
            total_entries: self.entries.len(),
            filtered_entries,
            search_query: self.search.committed(now).to_string(),
            pending_search_query: self.search.pending_value().map(str::to_string),
            history_size: self.history.size(),
            history_capacity: self.history.capacity(),
            history_full: self.history.is_full(),
            latest_winner: self.latest_winner.clone(),
            created_at: self.created_at,
        }
    }

    fn history_response(&self) -> HistoryResponse {
        HistoryResponse {
            winners: self.history.records().to_vec(),
            size: self.history.size(),
            capacity: self.history.capacity(),
            is_full: self.history.is_full(),
        }
    }
}

#[derive(Clone)]
pub struct DrawSessionService {
    sessions: Arc<Mutex<HashMap<Uuid, DrawSession>>>,
    ingestion: IngestionService,
    rng: Arc<Mutex<StdRng>>,
    clock: Arc<dyn Clock>,
    config: DrawConfig,
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Session {id} not found"))
}

impl DrawSessionService {
    pub fn new(config: DrawConfig, reader: Arc<dyn TabularReader>) -> Self {
        let rng = match config.rng_seed {
            Some(seed) => {
                log::warn!("Using fixed RNG seed {seed}; draws are reproducible");
                StdRng::seed_from_u64(seed)
            }
            None => StdRng::from_entropy(),
        };
        Self::with_parts(config, reader, Arc::new(SystemClock), rng)
    }

    pub fn with_parts(
        config: DrawConfig,
        reader: Arc<dyn TabularReader>,
        clock: Arc<dyn Clock>,
        rng: StdRng,
    ) -> Self {
        let options = ValidateOptions {
            skip_header: config.skip_header,
            mode: config.ingest_mode,
        };
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            ingestion: IngestionService::new(reader, options),
            rng: Arc::new(Mutex::new(rng)),
            clock,
            config,
        }
    }

    pub fn config(&self) -> &DrawConfig {
        &self.config
    }

    pub async fn create_session(&self) -> SessionResponse {
        let now = self.clock.now();
        let mut session = DrawSession::new(&self.config, now);
        let summary = session.summary(now);
        self.sessions.lock().await.insert(session.id, session);
        log::info!("Created draw session {}", summary.session_id);
        summary
    }

    pub async fn get_session(&self, id: Uuid) -> AppResult<SessionResponse> {
        let now = self.clock.now();
        let mut sessions = self.sessions.lock().await;
        let session = sessions.get_mut(&id).ok_or_else(|| not_found(id))?;
        session.touch(now);
        Ok(session.summary(now))
    }

    pub async fn delete_session(&self, id: Uuid) -> AppResult<()> {
        self.sessions
            .lock()
            .await
            .remove(&id)
            .map(|_| log::info!("Deleted draw session {id}"))
            .ok_or_else(|| not_found(id))
    }

    /// 上传并替换参与者列表。
    ///
    /// 解码在阻塞线程中进行且不持有锁；若期间有更新的上传，本次结果被丢弃。
    pub async fn upload(
        &self,
        id: Uuid,
        file_name: Option<String>,
        content_type: Option<String>,
        bytes: Vec<u8>,
    ) -> AppResult<UploadResponse> {
        let ticket = self.begin_upload(id).await?;

        let ingestion = self.ingestion.clone();
        let name = file_name.clone();
        let result = tokio::task::spawn_blocking(move || {
            ingestion.ingest(name.as_deref(), content_type.as_deref(), &bytes)
        })
        .await
        .map_err(|e| AppError::InternalError(format!("Ingestion task failed: {e}")))?;

        self.finish_upload(id, ticket, file_name, result).await
    }

    pub(crate) async fn begin_upload(&self, id: Uuid) -> AppResult<u64> {
        let now = self.clock.now();
        let mut sessions = self.sessions.lock().await;
        let session = sessions.get_mut(&id).ok_or_else(|| not_found(id))?;
        session.upload_seq += 1;
        session.touch(now);
        Ok(session.upload_seq)
    }

    pub(crate) async fn finish_upload(
        &self,
        id: Uuid,
        ticket: u64,
        file_name: Option<String>,
        result: AppResult<Vec<Entry>>,
    ) -> AppResult<UploadResponse> {
        let now = self.clock.now();
        let mut sessions = self.sessions.lock().await;
        let session = sessions.get_mut(&id).ok_or_else(|| not_found(id))?;
        session.touch(now);

        if session.upload_seq != ticket {
            log::info!(
                "Discarding stale upload #{ticket} for session {id} (latest #{})",
                session.upload_seq
            );
            return Err(AppError::UploadSuperseded);
        }

        let entries = result?;
        session.entries = entries.clone();
        session.source_file_name = file_name.clone();
        session.search.reset();
        session.latest_winner = None;
        if self.config.clear_history_on_upload {
            session.history = session.history.cleared();
        }

        Ok(UploadResponse {
            file_name,
            count: entries.len(),
            entries,
        })
    }

    pub async fn set_search(&self, id: Uuid, query: String) -> AppResult<SearchResponse> {
        let now = self.clock.now();
        let mut sessions = self.sessions.lock().await;
        let session = sessions.get_mut(&id).ok_or_else(|| not_found(id))?;

        session.search.input(query.clone(), now);
        session.latest_winner = None;
        session.touch(now);

        Ok(SearchResponse {
            pending_query: query,
            search_query: session.search.committed(now).to_string(),
            debounce_ms: self.config.search_debounce_ms,
        })
    }

    pub async fn list_entries(
        &self,
        id: Uuid,
        query: &EntryListQuery,
    ) -> AppResult<EntryListResponse> {
        let now = self.clock.now();
        let mut sessions = self.sessions.lock().await;
        let session = sessions.get_mut(&id).ok_or_else(|| not_found(id))?;
        session.touch(now);

        let filtered = session.filtered(now);
        let params = PaginationParams::new(query.page, query.per_page);
        Ok(EntryListResponse {
            total_entries: session.entries.len(),
            search_query: session.search.committed(now).to_string(),
            page: PaginatedResponse::from_slice(&filtered, &params),
        })
    }

    /// 从当前过滤后的列表中抽取一名中奖者并写入历史
    pub async fn draw(&self, id: Uuid) -> AppResult<DrawResponse> {
        let now = self.clock.now();
        let mut sessions = self.sessions.lock().await;
        let session = sessions.get_mut(&id).ok_or_else(|| not_found(id))?;
        session.touch(now);

        if session.entries.is_empty() {
            return Err(AppError::NoEntriesLoaded);
        }
        if self.config.stop_when_full && session.history.is_full() {
            return Err(AppError::HistoryFull(session.history.capacity()));
        }

        let pool = session.filtered(now);
        let winner = {
            let mut rng = self.rng.lock().await;
            draw(&pool, &mut *rng, self.clock.as_ref())?
        };

        session.history = session.history.append(winner.clone());
        session.latest_winner = Some(winner.clone());
        log::info!(
            "Session {id}: drew {} ({}) from pool of {}",
            winner.name,
            winner.id,
            pool.len()
        );

        Ok(DrawResponse {
            winner,
            pool_size: pool.len(),
            history_size: session.history.size(),
            history_full: session.history.is_full(),
        })
    }

    pub async fn history(&self, id: Uuid) -> AppResult<HistoryResponse> {
        let now = self.clock.now();
        let mut sessions = self.sessions.lock().await;
        let session = sessions.get_mut(&id).ok_or_else(|| not_found(id))?;
        session.touch(now);
        Ok(session.history_response())
    }

    pub async fn clear_history(&self, id: Uuid) -> AppResult<HistoryResponse> {
        let now = self.clock.now();
        let mut sessions = self.sessions.lock().await;
        let session = sessions.get_mut(&id).ok_or_else(|| not_found(id))?;
        session.touch(now);
        session.history = session.history.cleared();
        session.latest_winner = None;
        log::info!("Session {id}: winner history cleared");
        Ok(session.history_response())
    }

    /// 清理长时间无操作的会话，返回清理数量
    pub async fn sweep_idle(&self, max_idle: Duration) -> usize {
        let now = self.clock.now();
        let mut sessions = self.sessions.lock().await;
        let before = sessions.len();
        sessions.retain(|_, s| now - s.last_active_at < max_idle);
        before - sessions.len()
    }
}
