use crate::domain::entities::{mirror_config::MirrorConfig, mirror_job::MirrorJob};
use crate::infrastructure::forge::provider::{MirrorContext, MirrorOutcome, Provider};
use futures::future::join_all;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};

/// ミラー実行の設定
#[derive(Debug, Clone, Default)]
pub struct MirrorRepositoriesConfig {
    /// ワーカー数（Noneの場合は論理CPU数の2倍）
    pub pool_size: Option<usize>,
}

impl MirrorRepositoriesConfig {
    pub fn with_pool_size(mut self, pool_size: usize) -> Self {
        self.pool_size = Some(pool_size);
        self
    }

    /// 実際に起動するワーカー数（最低1）
    pub fn pool_size(&self) -> usize {
        self.pool_size
            .unwrap_or_else(|| 2 * num_cpus::get())
            .max(1)
    }
}

/// ワーカー1つ分の集計
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkerStats {
    /// ワーカーID
    pub worker_id: usize,
    /// 処理したジョブ数
    pub jobs: usize,
    /// プッシュ成功数（ジョブ×プロバイダ）
    pub pushed: usize,
    /// 失敗数
    pub failed: usize,
    /// スキップ数（未対応プロバイダ）
    pub skipped: usize,
}

impl WorkerStats {
    fn new(worker_id: usize) -> Self {
        Self {
            worker_id,
            ..Default::default()
        }
    }

    fn record(&mut self, outcome: MirrorOutcome) {
        match outcome {
            MirrorOutcome::Pushed => self.pushed += 1,
            MirrorOutcome::Failed => self.failed += 1,
            MirrorOutcome::Skipped => self.skipped += 1,
        }
    }
}

/// ミラー実行の結果
#[derive(Debug, Clone, Default)]
pub struct MirrorReport {
    /// 終了したワーカーごとの集計
    pub workers: Vec<WorkerStats>,
    /// 異常終了したワーカー数
    pub crashed_workers: usize,
    /// プロセス終了コード（0: 全成功, 1: 失敗あり）
    pub exit_code: i32,
}

impl MirrorReport {
    pub fn jobs_processed(&self) -> usize {
        self.workers.iter().map(|w| w.jobs).sum()
    }

    pub fn pushed(&self) -> usize {
        self.workers.iter().map(|w| w.pushed).sum()
    }

    pub fn failed(&self) -> usize {
        self.workers.iter().map(|w| w.failed).sum()
    }

    pub fn skipped(&self) -> usize {
        self.workers.iter().map(|w| w.skipped).sum()
    }

    pub fn is_success(&self) -> bool {
        self.exit_code == 0
    }
}

/// リポジトリミラーのユースケース
///
/// 固定数のワーカーが共有キューからジョブを取り出し、設定された全プロバイダへ
/// ミラーする。送信側を閉じることが終了シグナルで、全ワーカーをjoinしてから
/// エラーフラグを読む。
pub struct MirrorRepositoriesUseCase {
    config: MirrorRepositoriesConfig,
    providers: Arc<Vec<Provider>>,
    context: MirrorContext,
}

impl MirrorRepositoriesUseCase {
    /// 新しいMirrorRepositoriesUseCaseインスタンスを作成
    pub fn new(
        config: MirrorRepositoriesConfig,
        mirrors: &[MirrorConfig],
        context: MirrorContext,
    ) -> Self {
        let providers: Vec<Provider> = mirrors
            .iter()
            .cloned()
            .map(Provider::from_config)
            .collect();

        for provider in providers.iter().filter(|p| !p.is_supported()) {
            tracing::warn!(provider = provider.name(), "Unsupported provider will be skipped");
        }

        Self {
            config,
            providers: Arc::new(providers),
            context,
        }
    }

    pub fn providers(&self) -> &[Provider] {
        &self.providers
    }

    /// ミラーを実行
    pub async fn execute(&self, jobs: Vec<MirrorJob>) -> MirrorReport {
        let pool_size = self.config.pool_size();
        tracing::info!(
            jobs = jobs.len(),
            providers = self.providers.len(),
            workers = pool_size,
            "Starting mirror run"
        );

        // 1. ジョブ投入前に全ワーカーを起動
        let (sender, receiver) = mpsc::unbounded_channel::<MirrorJob>();
        let receiver = Arc::new(Mutex::new(receiver));

        let workers: Vec<_> = (0..pool_size)
            .map(|worker_id| {
                let receiver = Arc::clone(&receiver);
                let providers = Arc::clone(&self.providers);
                let context = self.context.clone();
                tokio::spawn(run_worker(worker_id, receiver, providers, context))
            })
            .collect();

        // 2. ジョブを投入し、送信側を閉じて終了を通知
        for job in jobs {
            if let Err(e) = sender.send(job) {
                tracing::error!(repo = e.0.repo_name(), "Job queue closed before enqueue");
                self.context.errors.raise();
            }
        }
        drop(sender);

        // 3. 全ワーカーの終了を待つ
        let mut report = MirrorReport::default();
        for result in join_all(workers).await {
            match result {
                Ok(stats) => report.workers.push(stats),
                Err(e) => {
                    tracing::error!("Mirror worker terminated abnormally: {}", e);
                    self.context.errors.raise();
                    report.crashed_workers += 1;
                }
            }
        }

        // 4. 全ワーカー終了後にエラーフラグを読む
        report.exit_code = self.context.errors.exit_code();

        tracing::info!(
            jobs = report.jobs_processed(),
            pushed = report.pushed(),
            failed = report.failed(),
            skipped = report.skipped(),
            "Mirror run finished"
        );
        report
    }
}

async fn run_worker(
    worker_id: usize,
    receiver: Arc<Mutex<mpsc::UnboundedReceiver<MirrorJob>>>,
    providers: Arc<Vec<Provider>>,
    context: MirrorContext,
) -> WorkerStats {
    let mut stats = WorkerStats::new(worker_id);

    loop {
        let next = {
            let mut receiver = receiver.lock().await;
            receiver.recv().await
        };
        // チャネルが閉じて空になったら終了
        let Some(job) = next else {
            break;
        };

        tracing::debug!(worker = worker_id, repo = job.repo_name(), "Mirroring");
        for provider in providers.iter() {
            stats.record(provider.mirror(&job, &context).await);
        }
        stats.jobs += 1;
    }

    tracing::debug!(worker = worker_id, jobs = stats.jobs, "Worker finished");
    stats
}
