use crate::models::Habit;

pub fn render_index(habits: &[Habit]) -> String {
    let completed = habits.iter().filter(|h| h.completed_today).count();
    INDEX_HTML
        .replace("{{COMPLETED}}", &completed.to_string())
        .replace("{{TOTAL}}", &habits.len().to_string())
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Habit Garden</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg: #d4edda;
      --ink: #220c10;
      --deep: #01497c;
      --leaf: #009b72;
      --sun: #ffc800;
      --berry: #720026;
      --sky: #a9d6e5;
      --card: #ffffff;
      --shadow: 0 24px 60px rgba(1, 73, 124, 0.14);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, #e9f7ee, transparent 60%),
        linear-gradient(160deg, var(--bg), #c2e6cc 70%, #d9f0de 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      padding: 40px 20px 64px;
    }

    .garden {
      width: min(1080px, 100%);
      margin: 0 auto;
      display: grid;
      gap: 28px;
    }

    header h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(2rem, 4vw, 2.9rem);
      margin: 0 0 6px;
    }

    header .subtitle {
      margin: 0;
      color: var(--deep);
      font-size: 1.05rem;
    }

    .weather {
      border: 2px solid var(--sun);
      border-radius: 24px;
      background: #fff9e6;
      box-shadow: var(--shadow);
      padding: 26px 30px;
      display: flex;
      align-items: center;
      justify-content: space-between;
      gap: 24px;
    }

    .weather h2 {
      margin: 0 0 6px;
      font-size: 1.6rem;
    }

    .weather p {
      margin: 0 0 14px;
      color: var(--deep);
    }

    .weather .emblem {
      font-size: 4rem;
      line-height: 1;
    }

    .meter {
      height: 14px;
      background: rgba(255, 255, 255, 0.6);
      border-radius: 999px;
      overflow: hidden;
      box-shadow: inset 0 2px 4px rgba(1, 73, 124, 0.15);
    }

    .meter .fill {
      height: 100%;
      border-radius: 999px;
      background: var(--sun);
      width: 0;
      transition: width 600ms ease;
    }

    .toolbar {
      display: flex;
      align-items: center;
      justify-content: space-between;
      gap: 16px;
    }

    .toolbar h2 {
      margin: 0;
      font-size: 1.5rem;
    }

    .toolbar .tally {
      color: var(--deep);
    }

    .grid {
      display: grid;
      grid-template-columns: repeat(auto-fill, minmax(280px, 1fr));
      gap: 22px;
    }

    .habit-card {
      position: relative;
      background: var(--card);
      border: 2px solid var(--sky);
      border-radius: 20px;
      padding: 22px;
      display: grid;
      gap: 18px;
      box-shadow: 0 12px 30px rgba(1, 73, 124, 0.1);
    }

    .habit-card .title {
      display: flex;
      align-items: center;
      gap: 12px;
      font-size: 1.15rem;
      font-weight: 600;
      padding-right: 40px;
    }

    .habit-card .title .icon {
      font-size: 2rem;
    }

    .plant {
      display: flex;
      align-items: center;
      gap: 18px;
    }

    .plant .stage {
      text-align: center;
    }

    .plant .stage .emoji {
      font-size: 3rem;
      display: block;
    }

    .plant .stage .label {
      font-size: 0.72rem;
      color: var(--deep);
      font-weight: 600;
    }

    .plant .progress {
      flex: 1;
    }

    .plant .progress .day {
      font-size: 0.9rem;
      color: var(--deep);
      font-weight: 600;
      margin-bottom: 8px;
    }

    button {
      appearance: none;
      border-radius: 999px;
      font-family: inherit;
      font-size: 0.95rem;
      font-weight: 600;
      cursor: pointer;
      transition: transform 150ms ease, box-shadow 150ms ease;
    }

    button:active {
      transform: scale(0.98);
    }

    .btn-water {
      border: 2px solid var(--leaf);
      color: var(--leaf);
      background: transparent;
      padding: 12px 16px;
      width: 100%;
    }

    .btn-water:hover:not(:disabled) {
      background: var(--leaf);
      color: white;
    }

    .btn-water:disabled {
      opacity: 0.5;
      cursor: not-allowed;
    }

    .btn-delete {
      position: absolute;
      top: 12px;
      right: 12px;
      width: 34px;
      height: 34px;
      border: 1px solid var(--berry);
      color: var(--berry);
      background: white;
      font-size: 1rem;
      line-height: 1;
    }

    .btn-delete:hover {
      background: var(--berry);
      color: white;
    }

    .goal {
      text-align: center;
      font-size: 0.85rem;
      color: var(--deep);
      font-weight: 500;
    }

    .fab {
      position: fixed;
      bottom: 28px;
      right: 28px;
      width: 60px;
      height: 60px;
      border: 2px solid var(--sun);
      background: var(--sun);
      color: var(--ink);
      font-size: 1.8rem;
      box-shadow: 0 14px 30px rgba(255, 200, 0, 0.4);
    }

    .empty {
      text-align: center;
      padding: 80px 20px;
      display: grid;
      gap: 18px;
      justify-items: center;
    }

    .empty .sun {
      font-size: 5.5rem;
    }

    .empty h2 {
      margin: 0;
      font-family: "Fraunces", "Georgia", serif;
      font-size: 2.2rem;
    }

    .empty p {
      margin: 0;
      color: var(--deep);
      font-size: 1.15rem;
    }

    .btn-plant {
      border: 2px solid var(--leaf);
      color: var(--leaf);
      background: white;
      padding: 16px 36px;
      font-size: 1.1rem;
    }

    .btn-plant:hover {
      background: var(--leaf);
      color: white;
    }

    dialog {
      border: 2px solid var(--sky);
      border-radius: 20px;
      padding: 28px;
      width: min(460px, 92vw);
      background: #fefcfb;
    }

    dialog::backdrop {
      background: rgba(34, 12, 16, 0.4);
    }

    dialog h3 {
      margin: 0 0 6px;
      font-size: 1.6rem;
    }

    dialog .hint {
      margin: 0 0 20px;
      color: var(--deep);
    }

    dialog label {
      display: block;
      font-weight: 600;
      margin-bottom: 8px;
    }

    dialog input,
    dialog select {
      width: 100%;
      border: 2px solid var(--sky);
      border-radius: 10px;
      padding: 12px;
      font-family: inherit;
      font-size: 1rem;
      margin-bottom: 18px;
    }

    .status {
      position: fixed;
      bottom: 28px;
      left: 50%;
      transform: translateX(-50%);
      background: var(--ink);
      color: white;
      border-radius: 999px;
      padding: 10px 22px;
      font-size: 0.95rem;
      opacity: 0;
      transition: opacity 200ms ease;
      pointer-events: none;
    }

    .status.show {
      opacity: 1;
    }

    .status[data-type="error"] {
      background: var(--berry);
    }
  </style>
</head>
<body>
  <main class="garden">
    <header>
      <h1>Welcome to Your Habit Garden</h1>
      <p class="subtitle">Track your daily habits and watch your garden flourish</p>
    </header>

    <section class="weather" id="weather" hidden>
      <div style="flex:1">
        <h2 id="weather-title">Rainy Day</h2>
        <p id="weather-desc">Time to water your garden with action</p>
        <div style="display:flex;align-items:center;gap:16px">
          <span><strong>Completion:</strong> <strong id="rate" style="font-size:1.3rem">0%</strong></span>
          <div class="meter" style="flex:1"><div class="fill" id="rate-fill"></div></div>
        </div>
      </div>
      <div class="emblem" id="weather-emblem">&#127783;&#65039;</div>
    </section>

    <section id="empty" class="empty" hidden>
      <div class="sun">&#9728;&#65039;</div>
      <h2>Welcome to Your Habit Garden</h2>
      <p>Start cultivating healthy habits today</p>
      <button class="btn-plant" type="button" onclick="openDialog()">Plant Your Seed</button>
    </section>

    <section id="habits-section" hidden>
      <div class="toolbar">
        <h2>Your Habits</h2>
        <span class="tally" id="tally">{{COMPLETED}} of {{TOTAL}} completed today</span>
      </div>
      <div class="grid" id="grid" style="margin-top:18px"></div>
    </section>

    <button class="fab" id="fab" type="button" title="Plant a new seed" onclick="openDialog()" hidden>+</button>
  </main>

  <dialog id="create-dialog">
    <h3>Plant a New Seed</h3>
    <p class="hint">Add a new habit to nurture and grow in your garden</p>
    <form id="create-form" method="dialog">
      <label for="habit-name">Habit Name</label>
      <input id="habit-name" placeholder="e.g., Morning Meditation" autocomplete="off" />
      <label for="habit-frequency">Frequency Goal</label>
      <select id="habit-frequency">
        <option value="daily" selected>Daily</option>
        <option value="weekly">Weekly</option>
        <option value="custom">Custom</option>
      </select>
      <button class="btn-plant" type="submit">Plant Seed</button>
    </form>
  </dialog>

  <div class="status" id="status"></div>

  <script>
    const grid = document.getElementById('grid');
    const statusEl = document.getElementById('status');
    const dialog = document.getElementById('create-dialog');

    const STAGES = [
      ['\u{1F330}', 'Seed Planted'],
      ['\u{1F331}', 'Germinating'],
      ['\u{1F331}', 'Tiny Sprout'],
      ['\u{1F33E}', 'Young Sprout'],
      ['\u{1F33E}', 'Young Plant'],
      ['\u{1F33F}', 'Growing Strong'],
      ['\u{1F340}', 'Maturing'],
      ['\u{1FAB4}', 'Pre-Bloom'],
      ['\u{1F338}', 'Budding'],
      ['\u{1F33C}', 'Blooming'],
      ['\u{1F33B}', 'Full Bloom!']
    ];

    let statusTimer = null;
    const showStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
      statusEl.classList.add('show');
      clearTimeout(statusTimer);
      statusTimer = setTimeout(() => statusEl.classList.remove('show'), 2600);
    };

    const stageFor = (growth) => STAGES[Math.min(10, Math.floor(growth / 10))];

    const plantColor = (growth) => {
      if (growth >= 80) return 'var(--sun)';
      if (growth >= 40) return 'var(--leaf)';
      return 'var(--sky)';
    };

    const weatherFor = (rate) => {
      if (rate > 80) {
        return ['☀️', 'Sunny Day', 'Peak Performance! Your garden is thriving!'];
      }
      if (rate >= 50) {
        return ['☁️', 'Cloudy Day', 'Good effort! Keep nurturing your habits'];
      }
      return ['\u{1F327}️', 'Rainy Day', 'Time to water your garden with action'];
    };

    const capitalize = (word) => word.charAt(0).toUpperCase() + word.slice(1);

    const renderCard = (habit) => {
      const [emoji, label] = stageFor(habit.growthStage);
      const card = document.createElement('div');
      card.className = 'habit-card';

      const title = document.createElement('div');
      title.className = 'title';
      const icon = document.createElement('span');
      icon.className = 'icon';
      icon.textContent = habit.icon;
      const name = document.createElement('span');
      name.textContent = habit.name;
      title.append(icon, name);

      const del = document.createElement('button');
      del.className = 'btn-delete';
      del.type = 'button';
      del.title = 'Remove habit';
      del.textContent = '\u{1F5D1}';
      del.addEventListener('click', () => removeHabit(habit));

      const plant = document.createElement('div');
      plant.className = 'plant';
      plant.innerHTML = `
        <div class="stage"><span class="emoji">${emoji}</span><span class="label">${label}</span></div>
        <div class="progress">
          <div class="day">Day ${Math.floor(habit.growthStage / 10)} of 10</div>
          <div class="meter"><div class="fill" style="width:${habit.growthStage}%;background:${plantColor(habit.growthStage)}"></div></div>
        </div>`;

      const water = document.createElement('button');
      water.className = 'btn-water';
      water.type = 'button';
      water.disabled = habit.completedToday;
      water.textContent = habit.completedToday ? 'Completed Today ✓' : 'Water Plant';
      water.addEventListener('click', () => waterHabit(habit.id));

      const goal = document.createElement('div');
      goal.className = 'goal';
      goal.textContent = `${capitalize(habit.frequency)} Goal`;

      card.append(del, title, plant, water, goal);
      return card;
    };

    const render = (garden) => {
      const hasHabits = garden.habits.length > 0;
      document.getElementById('empty').hidden = hasHabits;
      document.getElementById('weather').hidden = !hasHabits;
      document.getElementById('habits-section').hidden = !hasHabits;
      document.getElementById('fab').hidden = !hasHabits;

      const rate = Math.round(garden.completion_rate);
      const [emblem, title, desc] = weatherFor(garden.completion_rate);
      document.getElementById('weather-emblem').textContent = emblem;
      document.getElementById('weather-title').textContent = title;
      document.getElementById('weather-desc').textContent = desc;
      document.getElementById('rate').textContent = rate + '%';
      document.getElementById('rate-fill').style.width = rate + '%';
      document.getElementById('tally').textContent =
        `${garden.completed_today} of ${garden.total} completed today`;

      grid.replaceChildren(...garden.habits.map(renderCard));
    };

    const refresh = async () => {
      const res = await fetch('/api/garden');
      if (!res.ok) {
        throw new Error('Unable to load your garden');
      }
      render(await res.json());
    };

    // Audio cues, Web Audio API. A gentle droplet for watering, a two-note
    // chime when a plant reaches the fruiting stage.
    let audioCtx = null;
    const ctx = () => (audioCtx = audioCtx || new (window.AudioContext || window.webkitAudioContext)());

    const playWateringSound = () => {
      const ac = ctx();
      const osc = ac.createOscillator();
      const gain = ac.createGain();
      osc.connect(gain);
      gain.connect(ac.destination);
      osc.frequency.value = 600;
      osc.type = 'sine';
      gain.gain.setValueAtTime(0.2, ac.currentTime);
      gain.gain.exponentialRampToValueAtTime(0.01, ac.currentTime + 0.3);
      osc.start(ac.currentTime);
      osc.stop(ac.currentTime + 0.3);
    };

    const playBloomSound = () => {
      const ac = ctx();
      const note = (freq, duration) => {
        const osc = ac.createOscillator();
        const gain = ac.createGain();
        osc.connect(gain);
        gain.connect(ac.destination);
        osc.frequency.value = freq;
        osc.type = 'sine';
        gain.gain.value = 0.3;
        osc.start(ac.currentTime);
        osc.stop(ac.currentTime + duration);
      };
      note(800, 0.1);
      setTimeout(() => note(1000, 0.2), 100);
    };

    const playCues = (cues) => {
      if (cues.includes('water')) playWateringSound();
      if (cues.includes('bloom')) playBloomSound();
    };

    const waterHabit = async (id) => {
      const res = await fetch(`/api/habits/${id}/complete`, { method: 'POST' });
      if (!res.ok) {
        showStatus(await res.text() || 'Request failed', 'error');
        return;
      }
      const body = await res.json();
      playCues(body.cues);
      await refresh();
    };

    const removeHabit = async (habit) => {
      if (!confirm(`Remove "${habit.name}"? This cannot be undone.`)) {
        return;
      }
      const res = await fetch(`/api/habits/${habit.id}`, { method: 'DELETE' });
      if (!res.ok) {
        showStatus(await res.text() || 'Request failed', 'error');
        return;
      }
      const body = await res.json();
      if (body.notice) {
        showStatus(body.notice, 'ok');
      }
      await refresh();
    };

    const openDialog = () => {
      document.getElementById('habit-name').value = '';
      document.getElementById('habit-frequency').value = 'daily';
      dialog.showModal();
    };

    document.getElementById('create-form').addEventListener('submit', async (event) => {
      event.preventDefault();
      const name = document.getElementById('habit-name').value;
      const frequency = document.getElementById('habit-frequency').value;
      const res = await fetch('/api/habits', {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify({ name, frequency })
      });
      if (!res.ok) {
        showStatus(await res.text() || 'Request failed', 'error');
        return;
      }
      const body = await res.json();
      dialog.close();
      if (body.notice) {
        showStatus(body.notice, 'ok');
      }
      await refresh();
    });

    refresh().catch((err) => showStatus(err.message, 'error'));
  </script>
</body>
</html>
"#;
